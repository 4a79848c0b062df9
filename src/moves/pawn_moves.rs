use crate::game_state::chess_types::{Color, Square};
use crate::moves::knight_moves::set_if_valid;

/// Diagonal capture targets, `[white, black]`.
pub const PAWN_CAPTURE_TARGETS: [[u64; 64]; 2] = [
    generate_pawn_captures(-1),
    generate_pawn_captures(1),
];

#[inline]
pub const fn pawn_capture_targets(color: Color, square: Square) -> u64 {
    let index = match color {
        Color::White => 0,
        Color::Black => 1,
    };
    PAWN_CAPTURE_TARGETS[index][square as usize]
}

const fn generate_pawn_captures(row_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let row = (sq / 8) as i32;
        table[sq] = set_if_valid(file - 1, row + row_step) | set_if_valid(file + 1, row + row_step);
        sq += 1;
    }

    table
}
