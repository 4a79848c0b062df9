use crate::game_state::board::Position;
use crate::game_state::chess_rules::CASTLES;
use crate::game_state::chess_types::{Color, Move, Piece, PieceType, Square};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_shared::{is_open_to, iter_squares};
use crate::moves::king_moves::king_targets;

pub fn generate_king_moves(
    position: &Position,
    start: Square,
    side: Color,
    with_castling: bool,
    out: &mut Vec<Move>,
) {
    for target in iter_squares(king_targets(start)) {
        if is_open_to(position, side, target) {
            out.push(Move::new(start, target));
        }
    }

    if with_castling {
        generate_castling_moves(position, start, side, out);
    }
}

/// Castling is encoded as king square to rook square so that applying it can
/// be told apart from an ordinary king step.
fn generate_castling_moves(position: &Position, start: Square, side: Color, out: &mut Vec<Move>) {
    let own_king = Piece::new(PieceType::King, side);
    let own_rook = Piece::new(PieceType::Rook, side);
    let mut checked_in_check = None;

    for castle in CASTLES.iter().filter(|castle| castle.color == side) {
        if castle.king_from != start
            || !position.castling_rights.allows(castle.kind)
            || position.piece_at(castle.king_from) != own_king
            || position.piece_at(castle.rook_from) != own_rook
            || !castle.between.iter().all(|&sq| position.is_empty(sq))
        {
            continue;
        }

        // Cannot castle out of check.
        let in_check = *checked_in_check.get_or_insert_with(|| is_in_check(position, side));
        if in_check {
            return;
        }

        out.push(Move::new(start, castle.rook_from));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::board::Position;
    use crate::game_state::chess_types::{CastlingRights, Color, Move, Piece, PieceType};

    fn castling_position() -> Position {
        let mut position = Position::empty(Color::White);
        position.set_piece(60, Piece::new(PieceType::King, Color::White));
        position.set_piece(56, Piece::new(PieceType::Rook, Color::White));
        position.set_piece(63, Piece::new(PieceType::Rook, Color::White));
        position.set_piece(4, Piece::new(PieceType::King, Color::Black));
        position.castling_rights = CastlingRights::ALL;
        position
    }

    #[test]
    fn castling_targets_are_rook_squares() {
        let position = castling_position();
        let mut out = Vec::new();
        generate_king_moves(&position, 60, Color::White, true, &mut out);
        assert!(out.contains(&Move::new(60, 56)));
        assert!(out.contains(&Move::new(60, 63)));

        let mut attacks_only = Vec::new();
        generate_king_moves(&position, 60, Color::White, false, &mut attacks_only);
        assert!(!attacks_only.contains(&Move::new(60, 56)));
        assert_eq!(attacks_only.len(), 5);
    }

    #[test]
    fn no_castling_out_of_check_or_through_pieces() {
        let mut position = castling_position();
        position.set_piece(57, Piece::new(PieceType::Knight, Color::White));
        let mut out = Vec::new();
        generate_king_moves(&position, 60, Color::White, true, &mut out);
        assert!(!out.contains(&Move::new(60, 56)));
        assert!(out.contains(&Move::new(60, 63)));

        position.set_piece(20, Piece::new(PieceType::Rook, Color::Black));
        let mut in_check = Vec::new();
        generate_king_moves(&position, 60, Color::White, true, &mut in_check);
        assert!(!in_check.contains(&Move::new(60, 63)));
    }

    #[test]
    fn revoked_right_suppresses_castling() {
        let mut position = castling_position();
        position.castling_rights.white_kingside = false;
        let mut out = Vec::new();
        generate_king_moves(&position, 60, Color::White, true, &mut out);
        assert!(!out.contains(&Move::new(60, 63)));
        assert!(out.contains(&Move::new(60, 56)));
    }
}
