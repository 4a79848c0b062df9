use crate::game_state::chess_types::Square;
use crate::moves::knight_moves::set_if_valid;

pub const KING_TARGETS: [u64; 64] = generate_king_targets();

#[inline]
pub const fn king_targets(square: Square) -> u64 {
    KING_TARGETS[square as usize]
}

const fn generate_king_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let row = (sq / 8) as i32;
        let mut targets = 0u64;

        let mut d_row = -1;
        while d_row <= 1 {
            let mut d_file = -1;
            while d_file <= 1 {
                if d_row != 0 || d_file != 0 {
                    targets |= set_if_valid(file + d_file, row + d_row);
                }
                d_file += 1;
            }
            d_row += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}
