//! Game-termination detection after a committed move.
//!
//! Checked in order: no legal moves (checkmate or stalemate), threefold
//! repetition of the piece placement, then insufficient material. Every draw
//! sets the `stalemate` flag; `termination` records the reason.

use tracing::info;

use crate::game_state::board::{Board, Position, Termination};
use crate::game_state::chess_types::{Color, PieceType};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_legal_moves;

/// Number of occurrences a placement needs for a repetition draw.
pub const REPETITION_LIMIT: usize = 3;

/// Recompute the check flag of the side to move and detect the end of the game.
pub fn update_termination(board: &mut Board) {
    let to_move = board.position.color_to_move;
    let can_move = has_legal_moves(&board.position, to_move);
    let in_check = is_in_check(&board.position, to_move);

    match to_move {
        Color::White => board.white_in_check = in_check,
        Color::Black => board.black_in_check = in_check,
    }

    let termination = if !can_move {
        Some(if in_check {
            Termination::Checkmate
        } else {
            Termination::Stalemate
        })
    } else if repetition_count(board) >= REPETITION_LIMIT {
        Some(Termination::ThreefoldRepetition)
    } else if is_insufficient_material(&board.position) {
        Some(Termination::InsufficientMaterial)
    } else {
        None
    };

    if let Some(termination) = termination {
        finish(board, termination);
    }
}

fn finish(board: &mut Board, termination: Termination) {
    board.is_game_finished = true;
    board.checkmate = termination == Termination::Checkmate;
    board.stalemate = termination.is_draw();
    board.termination = Some(termination);

    info!(?termination, ply = board.ply(), "game finished");
}

/// How many times the current placement has occurred, counting the current one.
pub fn repetition_count(board: &Board) -> usize {
    let current = &board.position.squares;
    1 + board
        .repetition_history
        .iter()
        .filter(|squares| *squares == current)
        .count()
}

/// No pawns, and each side has at most one knight or bishop beside its king.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = [0u8; 2];

    for (_, piece) in position.occupied() {
        let side = match piece.color() {
            Some(Color::White) => 0,
            Some(Color::Black) => 1,
            None => continue,
        };

        match piece.piece_type() {
            PieceType::King | PieceType::None => {}
            PieceType::Knight | PieceType::Bishop => {
                minors[side] += 1;
                if minors[side] > 1 {
                    return false;
                }
            }
            PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
        }
    }

    true
}
