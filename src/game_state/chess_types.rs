//! Core value types shared by the board model and the rules engine.
//!
//! Pieces are packed into a single byte: the piece type lives in the low three
//! bits and the color is one of two flag bits above them. Every predicate on a
//! `Piece` is a pure mask operation and is total over all byte values.

use serde::{Deserialize, Serialize};

/// Board square index (`0..=63`), `0 == a8` and `63 == h1`.
pub type Square = u8;

/// Mask selecting the piece-type bits.
pub const TYPE_MASK: u8 = 0b0000_0111;
/// Mask selecting the color bits.
pub const COLOR_MASK: u8 = 0b0001_1000;

/// Piece type stored in the low bits of a `Piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    None = 0,
    King = 1,
    Pawn = 2,
    Knight = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl PieceType {
    /// Decode the type bits. Bit pattern 7 is not a piece and reads as `None`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & TYPE_MASK {
            1 => PieceType::King,
            2 => PieceType::Pawn,
            3 => PieceType::Knight,
            4 => PieceType::Bishop,
            5 => PieceType::Rook,
            6 => PieceType::Queen,
            _ => PieceType::None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Unsigned material value; the king carries a large sentinel.
    #[inline]
    pub const fn material(self) -> i32 {
        match self {
            PieceType::None => 0,
            PieceType::Pawn => 1,
            PieceType::Knight | PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 1000,
        }
    }
}

/// Side color, stored as a flag bit of a `Piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 8,
    Black = 16,
}

impl Color {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Decode the color bits. Zero or both flags set read as no color.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & COLOR_MASK {
            8 => Some(Color::White),
            16 => Some(Color::Black),
            _ => None,
        }
    }

    /// `+1` for white, `-1` for black.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// A square occupant: type bits OR color bits. `Piece::NONE` is the empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piece(pub u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece(piece_type.bits() | color.bits())
    }

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        PieceType::from_bits(self.0)
    }

    #[inline]
    pub const fn color(self) -> Option<Color> {
        Color::from_bits(self.0)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 & TYPE_MASK == 0
    }

    /// Bishop, rook, or queen.
    #[inline]
    pub const fn is_sliding(self) -> bool {
        matches!(
            self.piece_type(),
            PieceType::Bishop | PieceType::Rook | PieceType::Queen
        )
    }

    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        self.0 & COLOR_MASK == color.bits()
    }

    #[inline]
    pub const fn is_type(self, piece_type: PieceType) -> bool {
        self.0 & TYPE_MASK == piece_type.bits()
    }

    #[inline]
    pub const fn same_type(self, other: Piece) -> bool {
        self.0 & TYPE_MASK == other.0 & TYPE_MASK
    }

    #[inline]
    pub const fn same_color(self, other: Piece) -> bool {
        self.0 & COLOR_MASK == other.0 & COLOR_MASK
    }

    /// Same type with the other color bit. An uncolored byte is returned unchanged.
    #[inline]
    pub const fn flip_color(self) -> Piece {
        match self.color() {
            Some(color) => Piece((self.0 & !COLOR_MASK) | color.opposite().bits()),
            None => self,
        }
    }

    /// Signed material value: positive for white, negative for black, zero when uncolored.
    #[inline]
    pub const fn value(self) -> i32 {
        match self.color() {
            Some(color) => color.sign() * self.piece_type().material(),
            None => 0,
        }
    }
}

/// A move from one square to another.
///
/// Castling is expressed as king square to own rook square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub start: Square,
    pub target: Square,
}

impl Move {
    #[inline]
    pub const fn new(start: Square, target: Square) -> Self {
        Self { start, target }
    }

    /// Packed `start * 100 + target` key used by older clients.
    #[inline]
    pub const fn key(self) -> u16 {
        self.start as u16 * 100 + self.target as u16
    }

    #[inline]
    pub const fn from_key(key: u16) -> Self {
        Self {
            start: (key / 100) as Square,
            target: (key % 100) as Square,
        }
    }
}

/// Castling rights, named by the rook's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}
