use serde::{Deserialize, Serialize};

use crate::game_state::board::Termination;
use crate::game_state::chess_rules::CastleKind;
use crate::game_state::chess_types::*;

/// Single undo record for `apply_move` / `undo_move`.
///
/// Holds everything needed to put the board back exactly as it was before the
/// move, including the scalar flags the move recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoState {
    pub mv: Move,
    pub mover: Color,
    pub moved_piece: Piece,
    /// Piece left on the destination; differs from `moved_piece` on promotion.
    pub placed_piece: Piece,
    /// Captured piece and the square it stood on (behind the target for en passant).
    pub captured: Option<(Square, Piece)>,
    /// Set when the move castled.
    pub castled: Option<CastleKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_white_in_check: bool,
    pub prev_black_in_check: bool,
    pub prev_is_game_finished: bool,
    pub prev_checkmate: bool,
    pub prev_stalemate: bool,
    pub prev_termination: Option<Termination>,
    pub prev_moved_from: Option<Square>,
    pub prev_moved_to: Option<Square>,
    pub prev_white_advantage: i32,
}

impl UndoState {
    #[inline]
    pub fn is_castling(&self) -> bool {
        self.castled.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.placed_piece != self.moved_piece
    }
}
