//! Canonical chess-rule constants.
//!
//! Starting placement, home ranks, and the fixed geometry of the four
//! castling moves, all expressed in `0 == a8 .. 63 == h1` indexing.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastlingRights, Color, Piece, PieceType, Square};

const fn p(piece_type: PieceType, color: Color) -> Piece {
    Piece::new(piece_type, color)
}

const E: Piece = Piece::NONE;

/// Standard starting placement, black's back rank first.
pub const STARTING_SQUARES: [Piece; 64] = {
    use Color::{Black as B, White as W};
    use PieceType::*;
    [
        p(Rook, B), p(Knight, B), p(Bishop, B), p(Queen, B), p(King, B), p(Bishop, B), p(Knight, B), p(Rook, B),
        p(Pawn, B), p(Pawn, B), p(Pawn, B), p(Pawn, B), p(Pawn, B), p(Pawn, B), p(Pawn, B), p(Pawn, B),
        E, E, E, E, E, E, E, E,
        E, E, E, E, E, E, E, E,
        E, E, E, E, E, E, E, E,
        E, E, E, E, E, E, E, E,
        p(Pawn, W), p(Pawn, W), p(Pawn, W), p(Pawn, W), p(Pawn, W), p(Pawn, W), p(Pawn, W), p(Pawn, W),
        p(Rook, W), p(Knight, W), p(Bishop, W), p(Queen, W), p(King, W), p(Bishop, W), p(Knight, W), p(Rook, W),
    ]
};

/// Rank index a pawn of `color` double-steps from.
#[inline]
pub const fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Rank index on which a pawn of `color` promotes.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// Signed square offset of one pawn step for `color`.
#[inline]
pub const fn pawn_forward(color: Color) -> i8 {
    match color {
        Color::White => -8,
        Color::Black => 8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleKind {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

/// Fixed geometry of one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub kind: CastleKind,
    pub color: Color,
    pub king_from: Square,
    pub rook_from: Square,
    pub king_to: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub between: &'static [Square],
    /// Square the king crosses; it must not be attacked.
    pub king_transit: Square,
}

pub const CASTLES: [CastleGeometry; 4] = [
    CastleGeometry {
        kind: CastleKind::BlackQueenside,
        color: Color::Black,
        king_from: 4,
        rook_from: 0,
        king_to: 2,
        rook_to: 3,
        between: &[1, 2, 3],
        king_transit: 3,
    },
    CastleGeometry {
        kind: CastleKind::BlackKingside,
        color: Color::Black,
        king_from: 4,
        rook_from: 7,
        king_to: 6,
        rook_to: 5,
        between: &[5, 6],
        king_transit: 5,
    },
    CastleGeometry {
        kind: CastleKind::WhiteQueenside,
        color: Color::White,
        king_from: 60,
        rook_from: 56,
        king_to: 58,
        rook_to: 59,
        between: &[57, 58, 59],
        king_transit: 59,
    },
    CastleGeometry {
        kind: CastleKind::WhiteKingside,
        color: Color::White,
        king_from: 60,
        rook_from: 63,
        king_to: 62,
        rook_to: 61,
        between: &[61, 62],
        king_transit: 61,
    },
];

impl CastleKind {
    #[inline]
    pub fn geometry(self) -> &'static CastleGeometry {
        match self {
            CastleKind::BlackQueenside => &CASTLES[0],
            CastleKind::BlackKingside => &CASTLES[1],
            CastleKind::WhiteQueenside => &CASTLES[2],
            CastleKind::WhiteKingside => &CASTLES[3],
        }
    }
}

/// Castling geometry whose rook starts on `corner`, if `corner` is one of the four corners.
#[inline]
pub fn castle_for_corner(corner: Square) -> Option<&'static CastleGeometry> {
    CASTLES.iter().find(|castle| castle.rook_from == corner)
}

impl CastlingRights {
    #[inline]
    pub const fn allows(&self, kind: CastleKind) -> bool {
        match kind {
            CastleKind::WhiteKingside => self.white_kingside,
            CastleKind::WhiteQueenside => self.white_queenside,
            CastleKind::BlackKingside => self.black_kingside,
            CastleKind::BlackQueenside => self.black_queenside,
        }
    }

    #[inline]
    pub fn revoke(&mut self, kind: CastleKind) {
        match kind {
            CastleKind::WhiteKingside => self.white_kingside = false,
            CastleKind::WhiteQueenside => self.white_queenside = false,
            CastleKind::BlackKingside => self.black_kingside = false,
            CastleKind::BlackQueenside => self.black_queenside = false,
        }
    }
}
