//! Ray geometry for sliding pieces.
//!
//! Directions are indexed `0=north 1=south 2=west 3=east 4=north-west
//! 5=south-east 6=north-east 7=south-west`, where north points toward
//! square 0 (black's back rank). Rooks use directions `0..4`, bishops `4..8`,
//! queens all eight.

use crate::game_state::chess_types::{PieceType, Square};

pub const DIRECTION_OFFSETS: [i8; 8] = [-8, 8, -1, 1, -9, 9, -7, 7];

/// `NUM_SQUARES_TO_EDGE[square][direction]` is how many steps fit before the board edge.
pub const NUM_SQUARES_TO_EDGE: [[u8; 8]; 64] = generate_squares_to_edge();

const fn generate_squares_to_edge() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as u8;
        let row = (sq / 8) as u8;

        let north = row;
        let south = 7 - row;
        let west = file;
        let east = 7 - file;

        table[sq] = [
            north,
            south,
            west,
            east,
            min(north, west),
            min(south, east),
            min(north, east),
            min(south, west),
        ];
        sq += 1;
    }

    table
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

/// Direction index range a sliding piece walks; empty for non-sliders.
#[inline]
pub const fn direction_range(piece_type: PieceType) -> (usize, usize) {
    match piece_type {
        PieceType::Rook => (0, 4),
        PieceType::Bishop => (4, 8),
        PieceType::Queen => (0, 8),
        _ => (0, 0),
    }
}

/// Square `steps` along `direction` from `start`. The caller bounds `steps`
/// by `NUM_SQUARES_TO_EDGE`.
#[inline]
pub const fn ray_square(start: Square, direction: usize, steps: u8) -> Square {
    (start as i16 + DIRECTION_OFFSETS[direction] as i16 * steps as i16) as Square
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_center_edge_distances() {
        assert_eq!(NUM_SQUARES_TO_EDGE[0], [0, 7, 0, 7, 0, 7, 0, 0]);
        assert_eq!(NUM_SQUARES_TO_EDGE[63], [7, 0, 7, 0, 7, 0, 0, 0]);
        assert_eq!(NUM_SQUARES_TO_EDGE[27], [3, 4, 3, 4, 3, 4, 3, 3]);
    }

    #[test]
    fn rays_stay_on_board() {
        for start in 0..64u8 {
            for direction in 0..8 {
                for steps in 1..=NUM_SQUARES_TO_EDGE[start as usize][direction] {
                    assert!(ray_square(start, direction, steps) < 64);
                }
            }
        }
    }
}
