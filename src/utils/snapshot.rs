//! JSON snapshots sent to clients.
//!
//! A board snapshot carries every field of `Board`, including the undo log,
//! so a client or a restarted server can resume exactly where it left off.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::game_state::board::Board;
use crate::game_state::captures::CapturedPieces;
use crate::game_state::chess_types::Piece;
use crate::session::player::{Player, PlayerNumber};
use crate::session::room::{ChatMessage, Outcome, Room};

pub fn board_to_json(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string(board)
}

pub fn board_from_json(json: &str) -> serde_json::Result<Board> {
    serde_json::from_str(json)
}

/// What one player is sent after every room event.
#[derive(Debug, Serialize)]
pub struct RoomView<'a> {
    pub code: &'a str,
    pub you: PlayerNumber,
    pub board: &'a Board,
    pub players: &'a [Player; 2],
    pub white_pieces_taken: Vec<Piece>,
    pub black_pieces_taken: Vec<Piece>,
    /// Milliseconds left per player, indexed like `players`; `None` when untimed.
    pub time_left_ms: [Option<i64>; 2],
    pub chat: &'a [ChatMessage],
    pub outcome: Option<Outcome>,
}

impl<'a> RoomView<'a> {
    pub fn new(room: &'a Room, you: PlayerNumber, now: DateTime<Utc>) -> Self {
        let CapturedPieces {
            white_pieces_taken,
            black_pieces_taken,
        } = room.game().captured_pieces();

        let time_left_ms = [PlayerNumber::One, PlayerNumber::Two].map(|number| {
            room.time_left(number, now)
                .map(|left| left.num_milliseconds())
        });

        Self {
            code: room.code(),
            you,
            board: room.game().board(),
            players: room.players(),
            white_pieces_taken,
            black_pieces_taken,
            time_left_ms,
            chat: room.chat(),
            outcome: room.outcome(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
