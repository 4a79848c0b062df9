use crate::game_state::board::Position;
use crate::game_state::chess_types::{Color, Move, Square};
use crate::moves::sliding_moves::{direction_range, ray_square, NUM_SQUARES_TO_EDGE};

/// Bishop, rook, and queen moves: walk each ray until the edge, stopping
/// before an own piece or on an enemy piece.
pub fn generate_sliding_moves(position: &Position, start: Square, side: Color, out: &mut Vec<Move>) {
    let piece = position.piece_at(start);
    let (first, last) = direction_range(piece.piece_type());

    for direction in first..last {
        for steps in 1..=NUM_SQUARES_TO_EDGE[start as usize][direction] {
            let target = ray_square(start, direction, steps);
            let occupant = position.piece_at(target);

            if occupant.is_color(side) {
                break;
            }

            out.push(Move::new(start, target));

            if !occupant.is_none() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_sliding_moves;
    use crate::game_state::board::Position;
    use crate::game_state::chess_types::{Color, Piece, PieceType};

    #[test]
    fn queen_in_open_center_reaches_27_squares() {
        let mut position = Position::empty(Color::White);
        position.set_piece(27, Piece::new(PieceType::Queen, Color::White));
        let mut out = Vec::new();
        generate_sliding_moves(&position, 27, Color::White, &mut out);
        assert_eq!(out.len(), 27);
    }

    #[test]
    fn rook_stops_on_enemy_and_before_friend() {
        let mut position = Position::empty(Color::White);
        position.set_piece(56, Piece::new(PieceType::Rook, Color::White));
        position.set_piece(40, Piece::new(PieceType::Pawn, Color::Black));
        position.set_piece(59, Piece::new(PieceType::Knight, Color::White));
        let mut out = Vec::new();
        generate_sliding_moves(&position, 56, Color::White, &mut out);
        let targets: Vec<u8> = out.iter().map(|mv| mv.target).collect();
        // North: a2 then capture on a3. East: b1, c1, then blocked by own knight on d1.
        assert_eq!(targets, vec![48, 40, 57, 58]);
    }
}
