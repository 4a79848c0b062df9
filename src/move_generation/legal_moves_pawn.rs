use crate::game_state::board::Position;
use crate::game_state::chess_rules::{pawn_forward, pawn_home_rank};
use crate::game_state::chess_types::{rank_of, Color, Move, Square};
use crate::move_generation::legal_move_shared::{holds_enemy, iter_squares};
use crate::moves::pawn_moves::pawn_capture_targets;

/// Single step, double step from the home rank, diagonal captures, and the
/// en passant capture. Promotion is handled when the move is applied.
pub fn generate_pawn_moves(position: &Position, start: Square, side: Color, out: &mut Vec<Move>) {
    let forward = pawn_forward(side);

    if let Some(one_step) = offset(start, forward) {
        if position.is_empty(one_step) {
            out.push(Move::new(start, one_step));

            if rank_of(start) == pawn_home_rank(side) {
                if let Some(two_step) = offset(one_step, forward) {
                    if position.is_empty(two_step) {
                        out.push(Move::new(start, two_step));
                    }
                }
            }
        }
    }

    for target in iter_squares(pawn_capture_targets(side, start)) {
        if holds_enemy(position, side, target) || position.en_passant_square == Some(target) {
            out.push(Move::new(start, target));
        }
    }
}

#[inline]
fn offset(square: Square, delta: i8) -> Option<Square> {
    let next = square as i16 + delta as i16;
    (0..64).contains(&next).then_some(next as Square)
}
