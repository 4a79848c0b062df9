//! Hot-seat terminal game: both players share one keyboard.
//!
//! Reads coordinate moves (`e2e4`, castling as `e1h1`) and commands from
//! stdin. Time control comes from the `TANDEM_*` environment variables.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use tandem_chess::errors::SessionError;
use tandem_chess::session::config::SessionConfig;
use tandem_chess::session::player::PlayerNumber;
use tandem_chess::session::room::{Outcome, Room};
use tandem_chess::utils::algebraic::{algebraic_to_square, parse_coordinate_move, square_to_algebraic};
use tandem_chess::utils::render_board::render_board;

const HELP: &str = "commands: <from><to> (e.g. e2e4), moves <square>, undo, draw, resign, rematch, board, help, quit";

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::from_env();
    let mut rng = StdRng::from_os_rng();
    let mut room = Room::new("LOCAL", config, &mut rng);
    if let Err(err) = room.join(Utc::now()) {
        eprintln!("could not start the game: {err}");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{HELP}")?;
    show_board(&room, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = handle_command(&mut room, line.trim(), &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_command(room: &mut Room, command: &str, out: &mut impl Write) -> io::Result<bool> {
    let now = Utc::now();
    if let Some(outcome) = room.check_timeout(now) {
        report_outcome(outcome, out)?;
        return Ok(false);
    }

    let to_move = room.player_to_move();
    let mut parts = command.split_whitespace();

    let result = match parts.next() {
        None => return Ok(false),
        Some("quit" | "exit") => return Ok(true),
        Some("help") => {
            writeln!(out, "{HELP}")?;
            return Ok(false);
        }
        Some("board") => return show_board(room, out).map(|_| false),
        Some("moves") => return list_moves(room, parts.next(), out).map(|_| false),
        Some("undo") => match room
            .request_takeback(to_move.other())
            .and_then(|_| room.accept_takeback(to_move, now))
        {
            Ok(plies) => {
                writeln!(out, "took back {plies} ply")?;
                Ok(None)
            }
            Err(err) => Err(err),
        },
        Some("draw") => room
            .request_draw(to_move)
            .and_then(|_| room.accept_draw(to_move.other(), now))
            .map(Some),
        Some("resign") => room.resign(to_move, now).map(Some),
        Some("rematch") => room
            .request_rematch(to_move)
            .and_then(|_| room.accept_rematch(to_move.other(), now))
            .map(|_| None),
        Some(text) => match parse_coordinate_move(text) {
            Ok(mv) => room.submit_move(to_move, mv, now),
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(false);
            }
        },
    };

    match result {
        Ok(outcome) => {
            show_board(room, out)?;
            if let Some(outcome) = outcome {
                report_outcome(outcome, out)?;
            }
        }
        Err(SessionError::Illegal(err)) => writeln!(out, "illegal move: {err}")?,
        Err(err) => writeln!(out, "{err}")?,
    }

    Ok(false)
}

fn show_board(room: &Room, out: &mut impl Write) -> io::Result<()> {
    let game = room.game();
    let board = game.board();
    writeln!(out, "{}", render_board(board, game.color_to_move()))?;

    if !room.is_finished() {
        let check = if board.in_check(game.color_to_move()) { " (check)" } else { "" };
        writeln!(out, "{:?} to move{check}", game.color_to_move())?;
    }
    if let Some(left) = room.time_left(room.player_to_move(), Utc::now()) {
        writeln!(out, "clock: {}s", left.num_seconds())?;
    }
    Ok(())
}

fn list_moves(room: &Room, square: Option<&str>, out: &mut impl Write) -> io::Result<()> {
    let Some(start) = square.map(algebraic_to_square) else {
        return writeln!(out, "usage: moves <square>");
    };
    let start = match start {
        Ok(start) => start,
        Err(err) => return writeln!(out, "{err}"),
    };

    let targets: Vec<String> = room
        .game()
        .legal_moves(start)
        .into_iter()
        .filter_map(|target| square_to_algebraic(target).ok())
        .collect();
    writeln!(out, "{}", targets.join(" "))
}

fn report_outcome(outcome: Outcome, out: &mut impl Write) -> io::Result<()> {
    let winner = |number: PlayerNumber| match number {
        PlayerNumber::One => "player one",
        PlayerNumber::Two => "player two",
    };

    match outcome {
        Outcome::Checkmate { winner: w } => writeln!(out, "checkmate, {} wins", winner(w)),
        Outcome::Draw { reason } => writeln!(out, "draw by {reason:?}"),
        Outcome::DrawAgreed => writeln!(out, "draw agreed"),
        Outcome::Resignation { winner: w } => writeln!(out, "resignation, {} wins", winner(w)),
        Outcome::Timeout { winner: w } => writeln!(out, "flag fell, {} wins", winner(w)),
        Outcome::Abandoned { .. } => writeln!(out, "game abandoned"),
    }
}
