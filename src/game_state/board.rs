//! Board state representation.
//!
//! `Position` is the plain, copyable part of a board: piece placement, side to
//! move, en passant target, and castling rights. `Board` wraps a `Position`
//! with the flags the rules engine recomputes after every committed move and
//! with the move-record log used for undo, repetition detection, and the
//! captured-piece display.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::STARTING_SQUARES;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;

/// Why a game ended on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl Termination {
    #[inline]
    pub const fn is_draw(self) -> bool {
        !matches!(self, Termination::Checkmate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    #[serde(with = "placement")]
    pub squares: [Piece; 64],
    pub color_to_move: Color,
    pub en_passant_square: Option<Square>,
    pub castling_rights: CastlingRights,
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// Standard starting position, white to move.
    pub const fn initial() -> Self {
        Self {
            squares: STARTING_SQUARES,
            color_to_move: Color::White,
            en_passant_square: None,
            castling_rights: CastlingRights::ALL,
        }
    }

    /// No pieces, no castling rights.
    pub const fn empty(color_to_move: Color) -> Self {
        Self {
            squares: [Piece::NONE; 64],
            color_to_move,
            en_passant_square: None,
            castling_rights: CastlingRights::NONE,
        }
    }

    /// Occupant of `square`; out-of-range squares read as empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares
            .get(square as usize)
            .copied()
            .unwrap_or(Piece::NONE)
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        if let Some(slot) = self.squares.get_mut(square as usize) {
            *slot = piece;
        }
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Square of `color`'s king, found by search.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceType::King, color);
        self.squares
            .iter()
            .position(|&piece| piece == king)
            .map(|index| index as Square)
    }

    /// Occupied squares with their pieces, in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, piece)| !piece.is_none())
            .map(|(index, &piece)| (index as Square, piece))
    }

    #[inline]
    pub fn switch_color(&mut self) {
        self.color_to_move = self.color_to_move.opposite();
    }
}

/// Complete mutable game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub position: Position,

    pub white_in_check: bool,
    pub black_in_check: bool,

    pub is_game_finished: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub termination: Option<Termination>,

    pub moved_from: Option<Square>,
    pub moved_to: Option<Square>,

    /// Material balance from captures and promotions, positive when white is ahead.
    pub white_advantage: i32,

    /// Committed moves, most recent last.
    pub undo_stack: Vec<UndoState>,
    /// Piece placement before each committed move, parallel to `undo_stack`.
    #[serde(with = "placement::history")]
    pub repetition_history: Vec<[Piece; 64]>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    #[inline]
    pub fn new_game() -> Self {
        Self::from_position(Position::initial())
    }

    /// Wrap a position with cleared flags and no history.
    ///
    /// Check flags are not computed here; `ChessGame::from_position` does that.
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            white_in_check: false,
            black_in_check: false,
            is_game_finished: false,
            checkmate: false,
            stalemate: false,
            termination: None,
            moved_from: None,
            moved_to: None,
            white_advantage: 0,
            undo_stack: Vec::new(),
            repetition_history: Vec::new(),
        }
    }

    #[inline]
    pub fn color_to_move(&self) -> Color {
        self.position.color_to_move
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.position.piece_at(square)
    }

    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }

    #[inline]
    pub fn last_move(&self) -> Option<&UndoState> {
        self.undo_stack.last()
    }

    #[inline]
    pub fn has_history(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of committed moves (plies).
    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }
}

/// Serde adapters for 64-square arrays, which serde does not derive for.
mod placement {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::game_state::chess_types::Piece;

    pub fn serialize<S: Serializer>(squares: &[Piece; 64], serializer: S) -> Result<S::Ok, S::Error> {
        squares.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[Piece; 64], D::Error> {
        let squares = Vec::<Piece>::deserialize(deserializer)?;
        to_array::<D::Error>(squares)
    }

    fn to_array<E: Error>(squares: Vec<Piece>) -> Result<[Piece; 64], E> {
        let len = squares.len();
        squares
            .try_into()
            .map_err(|_| E::invalid_length(len, &"exactly 64 squares"))
    }

    pub mod history {
        use super::*;

        pub fn serialize<S: Serializer>(
            history: &[[Piece; 64]],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let slices: Vec<&[Piece]> = history.iter().map(|squares| squares.as_slice()).collect();
            slices.serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<[Piece; 64]>, D::Error> {
            Vec::<Vec<Piece>>::deserialize(deserializer)?
                .into_iter()
                .map(to_array::<D::Error>)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_one_king_each_and_white_to_move() {
        let board = Board::new_game();
        assert_eq!(board.color_to_move(), Color::White);
        assert_eq!(board.position.king_square(Color::White), Some(60));
        assert_eq!(board.position.king_square(Color::Black), Some(4));
        assert_eq!(board.position.castling_rights, CastlingRights::ALL);
        assert!(!board.has_history());
        assert_eq!(board.position.occupied().count(), 32);
    }

    #[test]
    fn out_of_range_squares_read_empty_and_ignore_writes() {
        let mut position = Position::empty(Color::White);
        position.set_piece(64, Piece::new(PieceType::Queen, Color::White));
        assert!(position.piece_at(64).is_none());
        assert_eq!(position.occupied().count(), 0);
    }
}
