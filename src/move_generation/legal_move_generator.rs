//! Move generation pipeline.
//!
//! Dispatches to the per-piece generators, then optionally filters candidate
//! moves by simulating each one on a copy of the position and discarding
//! those that leave the mover's king in check.

use crate::game_state::board::Position;
use crate::game_state::chess_types::{Color, Move, PieceType, Square};
use crate::move_generation::legal_move_apply::simulate_move;
use crate::move_generation::legal_move_shared::GenerationMode;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::generate_sliding_moves;

/// Append the moves of the `side` piece on `start` to `out`.
///
/// Nothing is generated when `start` is empty, off the board, or holds a
/// piece of the other side. `GenerationMode::Legal` is treated as
/// pseudo-legal here; use [`legal_moves_from`] for filtered moves.
pub fn pseudo_moves_from(
    position: &Position,
    start: Square,
    side: Color,
    mode: GenerationMode,
    out: &mut Vec<Move>,
) {
    let piece = position.piece_at(start);
    if start >= 64 || !piece.is_color(side) {
        return;
    }

    match piece.piece_type() {
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            generate_sliding_moves(position, start, side, out)
        }
        PieceType::King => generate_king_moves(position, start, side, mode.includes_castling(), out),
        PieceType::Knight => generate_knight_moves(position, start, side, out),
        PieceType::Pawn => generate_pawn_moves(position, start, side, out),
        PieceType::None => {}
    }
}

/// Moves of the side to move from `start`, filtered or not according to `mode`.
pub fn moves_from(position: &Position, start: Square, mode: GenerationMode) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    pseudo_moves_from(position, start, position.color_to_move, mode, &mut out);

    if mode == GenerationMode::Legal {
        out.retain(|&mv| simulate_move(position, mv).is_ok());
    }

    out
}

/// Legal moves of the side to move from `start`.
#[inline]
pub fn legal_moves_from(position: &Position, start: Square) -> Vec<Move> {
    moves_from(position, start, GenerationMode::Legal)
}

/// Every legal move of the side to move.
pub fn all_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for start in 0..64 {
        moves.extend(legal_moves_from(position, start));
    }
    moves
}

/// True when `color` has at least one legal move in `position`.
pub fn has_legal_moves(position: &Position, color: Color) -> bool {
    let mut as_color = *position;
    as_color.color_to_move = color;

    (0..64).any(|start| !legal_moves_from(&as_color, start).is_empty())
}
