//! One game room: two players sharing one authoritative `ChessGame`.
//!
//! The room is transport-agnostic. A socket layer maps client events onto
//! these methods and broadcasts the room state afterwards. Calls for one room
//! must be serialized by the caller.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{SessionError, SessionResult};
use crate::game::reconcile::reconcile_external_board;
use crate::game::rules_engine::ChessGame;
use crate::game_state::board::{Position, Termination};
use crate::game_state::chess_types::{Color, Move};
use crate::session::clock::GameClock;
use crate::session::config::SessionConfig;
use crate::session::player::{Player, PlayerNumber, PlayerStatus};

/// How a game in a room ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: PlayerNumber },
    /// Stalemate, repetition, or insufficient material on the board.
    Draw { reason: Termination },
    DrawAgreed,
    Resignation { winner: PlayerNumber },
    Timeout { winner: PlayerNumber },
    /// The other player left; `remaining` is the player still connected.
    Abandoned { remaining: PlayerNumber },
}

impl Outcome {
    pub fn winner(self) -> Option<PlayerNumber> {
        match self {
            Outcome::Checkmate { winner }
            | Outcome::Resignation { winner }
            | Outcome::Timeout { winner } => Some(winner),
            Outcome::Draw { .. } | Outcome::DrawAgreed | Outcome::Abandoned { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub player: PlayerNumber,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Room {
    code: String,
    config: SessionConfig,
    game: ChessGame,
    players: [Player; 2],
    clock: GameClock,
    chat: Vec<ChatMessage>,
    outcome: Option<Outcome>,
    connected: [bool; 2],
    joined: bool,
}

impl Room {
    /// A room holding only its host, player one.
    pub fn new(code: impl Into<String>, config: SessionConfig, rng: &mut impl Rng) -> Self {
        let host_color = config.resolve_host_color(rng);
        let code = code.into();
        info!(%code, ?host_color, timed = config.is_timed(), "room created");

        Self {
            code,
            config,
            game: ChessGame::new_game(),
            players: [
                Player::new(PlayerNumber::One, host_color),
                Player::new(PlayerNumber::Two, host_color.opposite()),
            ],
            clock: GameClock::new(&config),
            chat: Vec::new(),
            outcome: None,
            connected: [true, false],
            joined: false,
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    #[inline]
    pub fn player(&self, number: PlayerNumber) -> &Player {
        &self.players[number.index()]
    }

    #[inline]
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    #[inline]
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True once the second seat has been taken.
    #[inline]
    pub fn has_opponent(&self) -> bool {
        self.joined
    }

    /// A room accepts a joiner until its second seat is taken or its host leaves.
    pub fn is_joinable(&self) -> bool {
        !self.joined && self.connected[0]
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some() || self.game.is_finished()
    }

    pub fn is_empty(&self) -> bool {
        !self.connected.iter().any(|&connected| connected)
    }

    pub fn player_with_color(&self, color: Color) -> PlayerNumber {
        if self.players[0].color == color {
            PlayerNumber::One
        } else {
            PlayerNumber::Two
        }
    }

    pub fn player_to_move(&self) -> PlayerNumber {
        self.player_with_color(self.game.color_to_move())
    }

    /// Clock reading for `number`; `None` in an untimed game.
    pub fn time_left(&self, number: PlayerNumber, now: DateTime<Utc>) -> Option<Duration> {
        self.clock.remaining(self.player(number).color, now)
    }

    /// Seat the second player and start the game.
    pub fn join(&mut self, now: DateTime<Utc>) -> SessionResult<PlayerNumber> {
        if !self.is_joinable() {
            return Err(SessionError::RoomFull {
                code: self.code.clone(),
            });
        }

        self.joined = true;
        self.connected[1] = true;
        for player in &mut self.players {
            player.opponent_joined = true;
        }
        self.clock.switch_to(Color::White, now);

        info!(code = %self.code, "opponent joined, game started");
        Ok(PlayerNumber::Two)
    }

    /// Accept a client's full resulting placement as `number`'s move.
    pub fn submit_board(
        &mut self,
        number: PlayerNumber,
        proposed: &Position,
        now: DateTime<Utc>,
    ) -> SessionResult<Option<Outcome>> {
        self.ensure_turn(number)?;

        let mv = reconcile_external_board(self.game.position(), proposed).map_err(|err| {
            warn!(code = %self.code, ?number, %err, "rejected board submission");
            SessionError::from(err)
        })?;

        self.play(number, mv, now)
    }

    pub fn submit_move(
        &mut self,
        number: PlayerNumber,
        mv: Move,
        now: DateTime<Utc>,
    ) -> SessionResult<Option<Outcome>> {
        self.ensure_turn(number)?;
        self.play(number, mv, now)
    }

    fn play(
        &mut self,
        number: PlayerNumber,
        mv: Move,
        now: DateTime<Utc>,
    ) -> SessionResult<Option<Outcome>> {
        // A move that arrives after the flag fell loses on time instead.
        if self.clock.is_flagged(self.player(number).color, now) {
            return Ok(Some(self.finish(Outcome::Timeout { winner: number.other() }, now)));
        }

        if let Err(err) = self.game.apply_move(mv.start, mv.target) {
            warn!(code = %self.code, ?number, start = mv.start, target = mv.target, %err, "rejected move");
            return Err(err.into());
        }

        let board = self.game.board();
        let outcome = match board.termination {
            Some(Termination::Checkmate) => Some(Outcome::Checkmate { winner: number }),
            Some(reason) => Some(Outcome::Draw { reason }),
            None => None,
        };

        match outcome {
            Some(outcome) => Ok(Some(self.finish(outcome, now))),
            None => {
                self.clock.press(now);
                Ok(None)
            }
        }
    }

    pub fn resign(&mut self, number: PlayerNumber, now: DateTime<Utc>) -> SessionResult<Outcome> {
        self.ensure_playing()?;
        Ok(self.finish(Outcome::Resignation { winner: number.other() }, now))
    }

    pub fn request_takeback(&mut self, number: PlayerNumber) -> SessionResult<()> {
        self.ensure_playing()?;
        if !self.game.board().has_history() {
            return Err(SessionError::NothingToTakeBack);
        }
        self.send_request(number, PlayerStatus::TakebackSent, PlayerStatus::TakebackReceived);
        Ok(())
    }

    /// Undo so that the requesting opponent is to move again. Returns the
    /// number of plies taken back.
    pub fn accept_takeback(&mut self, number: PlayerNumber, now: DateTime<Utc>) -> SessionResult<usize> {
        self.ensure_playing()?;
        self.ensure_pending(number, PlayerStatus::TakebackSent, "takeback")?;

        let accepting_color = self.player(number).color;
        let plies = self.game.service_takeback(accepting_color);
        if plies == 0 {
            return Err(SessionError::NothingToTakeBack);
        }

        self.reset_statuses();
        self.clock.switch_to(self.game.color_to_move(), now);
        info!(code = %self.code, plies, "takeback serviced");
        Ok(plies)
    }

    pub fn request_draw(&mut self, number: PlayerNumber) -> SessionResult<()> {
        self.ensure_playing()?;
        self.send_request(number, PlayerStatus::DrawSent, PlayerStatus::DrawReceived);
        Ok(())
    }

    pub fn accept_draw(&mut self, number: PlayerNumber, now: DateTime<Utc>) -> SessionResult<Outcome> {
        self.ensure_playing()?;
        self.ensure_pending(number, PlayerStatus::DrawSent, "draw")?;
        Ok(self.finish(Outcome::DrawAgreed, now))
    }

    pub fn request_rematch(&mut self, number: PlayerNumber) -> SessionResult<()> {
        self.ensure_rematch_possible()?;
        self.send_request(number, PlayerStatus::RematchSent, PlayerStatus::RematchReceived);
        Ok(())
    }

    /// Start a fresh game with the colors swapped.
    pub fn accept_rematch(&mut self, number: PlayerNumber, now: DateTime<Utc>) -> SessionResult<()> {
        self.ensure_rematch_possible()?;
        self.ensure_pending(number, PlayerStatus::RematchSent, "rematch")?;

        for player in &mut self.players {
            player.color = player.color.opposite();
        }
        self.game = ChessGame::new_game();
        self.clock = GameClock::new(&self.config);
        self.clock.switch_to(Color::White, now);
        self.outcome = None;
        self.reset_statuses();

        info!(code = %self.code, white = ?self.player_with_color(Color::White), "rematch started");
        Ok(())
    }

    /// Turn down whatever the opponent asked for.
    pub fn decline(&mut self, number: PlayerNumber) -> SessionResult<()> {
        let received = matches!(
            self.player(number).status,
            PlayerStatus::TakebackReceived | PlayerStatus::DrawReceived | PlayerStatus::RematchReceived
        );
        if !received {
            return Err(SessionError::NoPendingRequest { request: "pending" });
        }

        self.players[number.index()].set_status(PlayerStatus::Idle);
        self.players[number.other().index()].set_status(PlayerStatus::RequestDeclined);
        Ok(())
    }

    pub fn post_chat(&mut self, number: PlayerNumber, content: impl Into<String>, now: DateTime<Utc>) {
        self.chat.push(ChatMessage {
            player: number,
            content: content.into(),
            sent_at: now,
        });
    }

    /// End the game if the side to move has run out of time.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> Option<Outcome> {
        if !self.joined || self.is_finished() {
            return None;
        }

        let to_move = self.player_to_move();
        if self.clock.is_flagged(self.player(to_move).color, now) {
            return Some(self.finish(Outcome::Timeout { winner: to_move.other() }, now));
        }
        None
    }

    /// Mark `number` as gone. An unfinished game is ended and the room stops
    /// accepting joiners. Returns true when nobody is left.
    pub fn disconnect(&mut self, number: PlayerNumber, now: DateTime<Utc>) -> bool {
        self.connected[number.index()] = false;

        if self.joined && !self.is_finished() {
            self.finish(Outcome::Abandoned { remaining: number.other() }, now);
        } else if self.joined {
            self.players[number.other().index()].set_status(PlayerStatus::OpponentDisconnected);
        }

        info!(code = %self.code, ?number, "player disconnected");
        self.is_empty()
    }

    fn ensure_playing(&self) -> SessionResult<()> {
        if !self.joined {
            return Err(SessionError::OpponentMissing);
        }
        if self.is_finished() {
            return Err(SessionError::GameFinished);
        }
        Ok(())
    }

    fn ensure_turn(&self, number: PlayerNumber) -> SessionResult<()> {
        self.ensure_playing()?;
        let color = self.player(number).color;
        if self.game.color_to_move() != color {
            return Err(SessionError::NotYourTurn { color });
        }
        Ok(())
    }

    fn ensure_rematch_possible(&self) -> SessionResult<()> {
        if !self.joined || self.connected.contains(&false) {
            return Err(SessionError::OpponentMissing);
        }
        if !self.is_finished() {
            return Err(SessionError::GameInProgress);
        }
        Ok(())
    }

    /// `number` may accept only what the opponent actually sent.
    fn ensure_pending(
        &self,
        number: PlayerNumber,
        sent: PlayerStatus,
        request: &'static str,
    ) -> SessionResult<()> {
        if self.player(number.other()).status != sent {
            return Err(SessionError::NoPendingRequest { request });
        }
        Ok(())
    }

    fn send_request(&mut self, number: PlayerNumber, sent: PlayerStatus, received: PlayerStatus) {
        self.players[number.index()].set_status(sent);
        self.players[number.other().index()].set_status(received);
    }

    fn reset_statuses(&mut self) {
        for player in &mut self.players {
            player.set_status(PlayerStatus::Idle);
        }
    }

    fn finish(&mut self, outcome: Outcome, now: DateTime<Utc>) -> Outcome {
        self.clock.stop(now);

        let (one, two) = match outcome {
            Outcome::Checkmate { winner } => self.decided(winner, PlayerStatus::Won, PlayerStatus::Lost),
            Outcome::Resignation { winner } => {
                self.decided(winner, PlayerStatus::OpponentResigned, PlayerStatus::Lost)
            }
            Outcome::Timeout { winner } => {
                self.decided(winner, PlayerStatus::OpponentTimedOut, PlayerStatus::TimedOut)
            }
            Outcome::Draw { .. } | Outcome::DrawAgreed => {
                for player in &mut self.players {
                    player.score += 1;
                }
                (PlayerStatus::Drawn, PlayerStatus::Drawn)
            }
            Outcome::Abandoned { remaining } => match remaining {
                PlayerNumber::One => (PlayerStatus::OpponentDisconnected, PlayerStatus::Idle),
                PlayerNumber::Two => (PlayerStatus::Idle, PlayerStatus::OpponentDisconnected),
            },
        };
        self.players[0].set_status(one);
        self.players[1].set_status(two);

        self.outcome = Some(outcome);
        info!(code = %self.code, ?outcome, ply = self.game.board().ply(), "game ended");
        outcome
    }

    /// Score the winner and return the statuses of players one and two.
    fn decided(
        &mut self,
        winner: PlayerNumber,
        winner_status: PlayerStatus,
        loser_status: PlayerStatus,
    ) -> (PlayerStatus, PlayerStatus) {
        self.players[winner.index()].score += 1;
        match winner {
            PlayerNumber::One => (winner_status, loser_status),
            PlayerNumber::Two => (loser_status, winner_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::errors::IllegalMove;
    use crate::game_state::chess_types::{Piece, PieceType};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    /// Host (player one) plays white; player two has joined.
    fn started(config: SessionConfig) -> Room {
        let mut rng = StdRng::seed_from_u64(1);
        let mut room = Room::new("ROOMA", config.with_host_color(Color::White), &mut rng);
        room.join(at(0)).expect("second seat is free");
        room
    }

    #[test]
    fn join_fills_the_room_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut room = Room::new("ROOMB", SessionConfig::default(), &mut rng);
        assert_eq!(room.resign(PlayerNumber::One, at(0)), Err(SessionError::OpponentMissing));
        assert_eq!(room.join(at(0)), Ok(PlayerNumber::Two));
        assert!(room.players().iter().all(|player| player.opponent_joined));
        assert_ne!(room.player(PlayerNumber::One).color, room.player(PlayerNumber::Two).color);
        assert_eq!(
            room.join(at(1)),
            Err(SessionError::RoomFull {
                code: "ROOMB".to_owned()
            })
        );
    }

    #[test]
    fn moves_alternate_between_players() {
        let mut room = started(SessionConfig::default());
        assert_eq!(
            room.submit_move(PlayerNumber::Two, Move::new(12, 28), at(1)),
            Err(SessionError::NotYourTurn { color: Color::Black })
        );
        assert_eq!(room.submit_move(PlayerNumber::One, Move::new(52, 36), at(1)), Ok(None));
        assert_eq!(room.player_to_move(), PlayerNumber::Two);
        assert_eq!(
            room.submit_move(PlayerNumber::Two, Move::new(12, 36), at(2)),
            Err(SessionError::Illegal(IllegalMove::NotInMoveSet { start: 12, target: 36 }))
        );
    }

    #[test]
    fn submitted_boards_are_reconciled_and_validated() {
        let mut room = started(SessionConfig::default());

        let mut proposed = *room.game().position();
        proposed.set_piece(52, Piece::NONE);
        proposed.set_piece(36, Piece::new(PieceType::Pawn, Color::White));
        assert_eq!(room.submit_board(PlayerNumber::One, &proposed, at(1)), Ok(None));
        assert_eq!(room.game().board().ply(), 1);

        let mut teleport = *room.game().position();
        teleport.set_piece(3, Piece::NONE);
        teleport.set_piece(59, Piece::new(PieceType::Queen, Color::Black));
        let result = room.submit_board(PlayerNumber::Two, &teleport, at(2));
        assert!(matches!(result, Err(SessionError::Illegal(_))));
        assert_eq!(room.game().board().ply(), 1);
    }

    #[test]
    fn fools_mate_scores_the_winner() {
        let mut room = started(SessionConfig::default());
        for (number, mv) in [
            (PlayerNumber::One, Move::new(53, 45)),
            (PlayerNumber::Two, Move::new(12, 28)),
            (PlayerNumber::One, Move::new(54, 38)),
        ] {
            assert_eq!(room.submit_move(number, mv, at(1)), Ok(None));
        }

        let outcome = room.submit_move(PlayerNumber::Two, Move::new(3, 39), at(2));
        assert_eq!(outcome, Ok(Some(Outcome::Checkmate { winner: PlayerNumber::Two })));
        assert_eq!(room.player(PlayerNumber::Two).status, PlayerStatus::Won);
        assert_eq!(room.player(PlayerNumber::One).status, PlayerStatus::Lost);
        assert_eq!(room.player(PlayerNumber::Two).score, 1);
        assert_eq!(
            room.submit_move(PlayerNumber::One, Move::new(52, 44), at(3)),
            Err(SessionError::GameFinished)
        );
    }

    #[test]
    fn takeback_needs_a_request_and_returns_the_turn() {
        let mut room = started(SessionConfig::default());
        room.submit_move(PlayerNumber::One, Move::new(52, 36), at(1)).expect("e2e4");
        room.submit_move(PlayerNumber::Two, Move::new(12, 28), at(2)).expect("e7e5");

        assert_eq!(
            room.accept_takeback(PlayerNumber::Two, at(3)),
            Err(SessionError::NoPendingRequest { request: "takeback" })
        );

        room.request_takeback(PlayerNumber::One).expect("history exists");
        assert_eq!(room.player(PlayerNumber::Two).status, PlayerStatus::TakebackReceived);
        assert_eq!(room.accept_takeback(PlayerNumber::Two, at(3)), Ok(2));
        assert_eq!(room.player_to_move(), PlayerNumber::One);
        assert!(room.players().iter().all(|p| p.status == PlayerStatus::Idle));
    }

    #[test]
    fn draw_offer_can_be_declined_or_accepted() {
        let mut room = started(SessionConfig::default());
        room.request_draw(PlayerNumber::One).expect("game running");
        room.decline(PlayerNumber::Two).expect("offer pending");
        assert_eq!(room.player(PlayerNumber::One).status, PlayerStatus::RequestDeclined);
        assert_eq!(
            room.accept_draw(PlayerNumber::Two, at(1)),
            Err(SessionError::NoPendingRequest { request: "draw" })
        );

        room.request_draw(PlayerNumber::Two).expect("game running");
        assert_eq!(room.accept_draw(PlayerNumber::One, at(1)), Ok(Outcome::DrawAgreed));
        assert!(room.players().iter().all(|p| p.status == PlayerStatus::Drawn && p.score == 1));
    }

    #[test]
    fn rematch_swaps_colors_after_the_game() {
        let mut room = started(SessionConfig::default());
        assert_eq!(room.request_rematch(PlayerNumber::One), Err(SessionError::GameInProgress));

        room.resign(PlayerNumber::One, at(1)).expect("game running");
        assert_eq!(room.player(PlayerNumber::Two).status, PlayerStatus::OpponentResigned);

        room.request_rematch(PlayerNumber::Two).expect("game over");
        room.accept_rematch(PlayerNumber::One, at(2)).expect("rematch pending");
        assert_eq!(room.player(PlayerNumber::One).color, Color::Black);
        assert_eq!(room.player_to_move(), PlayerNumber::Two);
        assert!(!room.is_finished());
        assert_eq!(room.game().board().ply(), 0);
        assert_eq!(room.player(PlayerNumber::Two).score, 1);
    }

    #[test]
    fn flag_fall_ends_the_game() {
        let mut room = started(SessionConfig::default().with_timer_minutes(1));
        assert_eq!(room.check_timeout(at(30)), None);
        assert_eq!(
            room.check_timeout(at(61)),
            Some(Outcome::Timeout { winner: PlayerNumber::Two })
        );
        assert_eq!(room.player(PlayerNumber::One).status, PlayerStatus::TimedOut);
        assert_eq!(room.time_left(PlayerNumber::One, at(100)), Some(Duration::zero()));
    }

    #[test]
    fn late_move_loses_on_time() {
        let mut room = started(SessionConfig::default().with_timer_minutes(1));
        let outcome = room.submit_move(PlayerNumber::One, Move::new(52, 36), at(75));
        assert_eq!(outcome, Ok(Some(Outcome::Timeout { winner: PlayerNumber::Two })));
        assert_eq!(room.game().board().ply(), 0);
    }

    #[test]
    fn disconnect_ends_the_game_and_closes_the_room() {
        let mut room = started(SessionConfig::default());
        assert!(!room.disconnect(PlayerNumber::Two, at(5)));
        assert_eq!(room.outcome(), Some(Outcome::Abandoned { remaining: PlayerNumber::One }));
        assert_eq!(room.player(PlayerNumber::One).status, PlayerStatus::OpponentDisconnected);
        assert!(!room.is_joinable());
        assert!(room.disconnect(PlayerNumber::One, at(6)));
    }

    #[test]
    fn chat_keeps_order() {
        let mut room = started(SessionConfig::default());
        room.post_chat(PlayerNumber::One, "good luck", at(1));
        room.post_chat(PlayerNumber::Two, "you too", at(2));
        let lines: Vec<_> = room.chat().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(lines, ["good luck", "you too"]);
    }
}
