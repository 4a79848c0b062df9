use crate::game_state::board::Position;
use crate::game_state::chess_types::{Color, Move, Square};
use crate::move_generation::legal_move_shared::{is_open_to, iter_squares};
use crate::moves::knight_moves::knight_targets;

pub fn generate_knight_moves(position: &Position, start: Square, side: Color, out: &mut Vec<Move>) {
    for target in iter_squares(knight_targets(start)) {
        if is_open_to(position, side, target) {
            out.push(Move::new(start, target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::board::Position;
    use crate::game_state::chess_types::{Color, Move};

    #[test]
    fn knight_on_b1_skips_own_pawn_on_d2() {
        let position = Position::initial();
        let mut out = Vec::new();
        generate_knight_moves(&position, 57, Color::White, &mut out);
        out.sort();
        assert_eq!(out, vec![Move::new(57, 40), Move::new(57, 42)]);
    }
}
