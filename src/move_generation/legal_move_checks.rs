//! Check detection.
//!
//! A square is attacked when any piece of the attacking side has a
//! pseudo-legal move onto it. Pawn diagonals therefore only count on
//! occupied squares, which is all a king ever needs. Attack generation never
//! includes castling, so check detection cannot recurse back into itself
//! through the king generator.

use crate::game_state::board::Position;
use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legal_move_generator::pseudo_moves_from;
use crate::move_generation::legal_move_shared::GenerationMode;

pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let mut moves = Vec::with_capacity(32);

    for (start, piece) in position.occupied() {
        if !piece.is_color(attacker) {
            continue;
        }

        moves.clear();
        pseudo_moves_from(position, start, attacker, GenerationMode::Attacks, &mut moves);
        if moves.iter().any(|mv| mv.target == square) {
            return true;
        }
    }

    false
}

/// True when `color`'s king is attacked. A side without a king is never in check.
#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}
