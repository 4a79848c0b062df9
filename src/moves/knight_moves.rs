use crate::game_state::chess_types::Square;

pub const KNIGHT_TARGETS: [u64; 64] = generate_knight_targets();

#[inline]
pub const fn knight_targets(square: Square) -> u64 {
    KNIGHT_TARGETS[square as usize]
}

const fn generate_knight_targets() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let row = (sq / 8) as i32;
        let mut targets = 0u64;

        targets |= set_if_valid(file + 1, row + 2);
        targets |= set_if_valid(file + 2, row + 1);
        targets |= set_if_valid(file + 2, row - 1);
        targets |= set_if_valid(file + 1, row - 2);
        targets |= set_if_valid(file - 1, row - 2);
        targets |= set_if_valid(file - 2, row - 1);
        targets |= set_if_valid(file - 2, row + 1);
        targets |= set_if_valid(file - 1, row + 2);

        table[sq] = targets;
        sq += 1;
    }

    table
}

pub(crate) const fn set_if_valid(file: i32, row: i32) -> u64 {
    if file < 0 || file > 7 || row < 0 || row > 7 {
        return 0;
    }

    let square = (row as usize) * 8 + (file as usize);
    1u64 << square
}
