//! Captured-piece display lists.
//!
//! Each side's list shows the pieces it has taken, net of equal trades: a
//! capture of a piece type cancels against one capture of the same type by
//! the opponent. Lists are rebuilt from the move log on demand, so undo
//! needs no extra bookkeeping.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    /// Pieces white has taken (black pieces), highest value first.
    pub white_pieces_taken: Vec<Piece>,
    /// Pieces black has taken (white pieces), highest value first.
    pub black_pieces_taken: Vec<Piece>,
}

pub fn captured_pieces(board: &Board) -> CapturedPieces {
    let mut lists = CapturedPieces::default();

    for record in &board.undo_stack {
        let Some((_, piece)) = record.captured else {
            continue;
        };

        let (own, other) = match record.mover {
            Color::White => (&mut lists.white_pieces_taken, &mut lists.black_pieces_taken),
            Color::Black => (&mut lists.black_pieces_taken, &mut lists.white_pieces_taken),
        };

        match other.iter().position(|taken| taken.same_type(piece)) {
            Some(index) => {
                other.remove(index);
            }
            None => own.push(piece),
        }
    }

    sort_for_display(&mut lists.white_pieces_taken);
    sort_for_display(&mut lists.black_pieces_taken);
    lists
}

fn sort_for_display(pieces: &mut [Piece]) {
    pieces.sort_by_key(|piece| std::cmp::Reverse(piece.piece_type().material()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{CastlingRights, Move, PieceType};
    use crate::game_state::undo_state::UndoState;

    fn capture(mover: Color, piece: Piece) -> UndoState {
        UndoState {
            mv: Move::new(0, 1),
            mover,
            moved_piece: Piece::new(PieceType::Queen, mover),
            placed_piece: Piece::new(PieceType::Queen, mover),
            captured: Some((1, piece)),
            castled: None,
            prev_castling_rights: CastlingRights::NONE,
            prev_en_passant_square: None,
            prev_white_in_check: false,
            prev_black_in_check: false,
            prev_is_game_finished: false,
            prev_checkmate: false,
            prev_stalemate: false,
            prev_termination: None,
            prev_moved_from: None,
            prev_moved_to: None,
            prev_white_advantage: 0,
        }
    }

    #[test]
    fn equal_trades_cancel_and_lists_sort_by_value() {
        let mut board = Board::new_game();
        let black_knight = Piece::new(PieceType::Knight, Color::Black);
        let white_knight = Piece::new(PieceType::Knight, Color::White);
        let black_rook = Piece::new(PieceType::Rook, Color::Black);
        let black_pawn = Piece::new(PieceType::Pawn, Color::Black);

        board.undo_stack.push(capture(Color::White, black_knight));
        board.undo_stack.push(capture(Color::White, black_pawn));
        board.undo_stack.push(capture(Color::Black, white_knight));
        board.undo_stack.push(capture(Color::White, black_rook));

        let lists = captured_pieces(&board);
        assert_eq!(lists.white_pieces_taken, vec![black_rook, black_pawn]);
        assert!(lists.black_pieces_taken.is_empty());
    }
}
