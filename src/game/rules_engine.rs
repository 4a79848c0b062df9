//! Rules engine facade.
//!
//! `ChessGame` owns one `Board` and exposes the operations a session needs:
//! move requests, legal-move queries, undo, and takeback. Every mutating call
//! either completes fully or leaves the board unchanged.

use crate::errors::MoveResult;
use crate::game_state::board::{Board, Position};
use crate::game_state::captures::{captured_pieces, CapturedPieces};
use crate::game_state::chess_types::{Color, Move, Square};
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{
    all_legal_moves, has_legal_moves, legal_moves_from,
};
use crate::move_generation::termination::update_termination;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
}

impl ChessGame {
    /// Standard starting position, all castling rights, no history.
    pub fn new_game() -> Self {
        Self {
            board: Board::new_game(),
        }
    }

    /// Start from an arbitrary position. Check and termination flags are
    /// computed for the side to move.
    pub fn from_position(position: Position) -> Self {
        let mut board = Board::from_position(position);
        update_termination(&mut board);
        Self { board }
    }

    /// Resume a previously saved board as-is.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.board.position
    }

    #[inline]
    pub fn color_to_move(&self) -> Color {
        self.board.color_to_move()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.board.is_game_finished
    }

    /// Play `start -> target` for the side to move.
    pub fn apply_move(&mut self, start: Square, target: Square) -> MoveResult<()> {
        apply_move(&mut self.board, Move::new(start, target))
    }

    /// Boolean form of [`ChessGame::apply_move`].
    pub fn try_move(&mut self, start: Square, target: Square) -> bool {
        self.apply_move(start, target).is_ok()
    }

    /// Legal target squares of the piece on `start`. Empty for empty squares,
    /// opponent pieces, and off-board indices.
    pub fn legal_moves(&self, start: Square) -> Vec<Square> {
        legal_moves_from(&self.board.position, start)
            .into_iter()
            .map(|mv| mv.target)
            .collect()
    }

    pub fn all_legal_moves(&self) -> Vec<Move> {
        all_legal_moves(&self.board.position)
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        has_legal_moves(&self.board.position, color)
    }

    /// Computed from the placement, not from the cached flags.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board.position, color)
    }

    /// Undo the most recent move. No-op without history.
    pub fn undo(&mut self) -> Option<UndoState> {
        undo_move(&mut self.board)
    }

    /// Undo once, and again if that hands the move back to `accepting_color`,
    /// so the player who asked for the takeback is to move afterwards.
    ///
    /// Returns the number of plies taken back.
    pub fn service_takeback(&mut self, accepting_color: Color) -> usize {
        if self.undo().is_none() {
            return 0;
        }
        if self.color_to_move() == accepting_color && self.undo().is_some() {
            return 2;
        }
        1
    }

    pub fn captured_pieces(&self) -> CapturedPieces {
        captured_pieces(&self.board)
    }
}
