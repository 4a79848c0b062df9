use crate::game_state::board::Position;
use crate::game_state::chess_types::{Color, Square};

/// How much of the rule set a generator call applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Piece movement only, no castling. Used for attack and check detection.
    Attacks,
    /// Piece movement plus castling; the own king may be left in check.
    PseudoLegal,
    /// Pseudo-legal moves that survive a simulated application.
    Legal,
}

impl GenerationMode {
    #[inline]
    pub const fn includes_castling(self) -> bool {
        !matches!(self, GenerationMode::Attacks)
    }
}

/// Squares of the set bits in `mask`, lowest first.
#[inline]
pub fn iter_squares(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let square = mask.trailing_zeros() as Square;
        mask &= mask - 1;
        Some(square)
    })
}

/// True when `side` may land on `target`: empty or enemy-occupied.
#[inline]
pub fn is_open_to(position: &Position, side: Color, target: Square) -> bool {
    !position.piece_at(target).is_color(side)
}

/// True when `target` holds a piece of the other color.
#[inline]
pub fn holds_enemy(position: &Position, side: Color, target: Square) -> bool {
    position
        .piece_at(target)
        .color()
        .is_some_and(|color| color != side)
}
