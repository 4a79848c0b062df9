//! Square and move conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g., `e4`, `e2e4`) and the
//! internal `0 == a8 .. 63 == h1` square indexing.

use crate::game_state::chess_types::{file_of, rank_of, Move, Square};

/// Convert a coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    let file_index = file - b'a';
    let row = b'8' - rank;
    Ok(row * 8 + file_index)
}

/// Convert a square index (`0..=63`) to a coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'8' - rank_of(square));

    Ok(format!("{file_char}{rank_char}"))
}

/// Parse a start and target pair such as `"e2e4"` or `"e2 e4"`.
///
/// Castling is written king square to rook square, e.g. `"e1h1"`.
pub fn parse_coordinate_move(text: &str) -> Result<Move, String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(format!("Invalid coordinate move: {text}"));
    }

    let start = algebraic_to_square(&compact[..2])?;
    let target = algebraic_to_square(&compact[2..])?;
    Ok(Move::new(start, target))
}

pub fn move_to_coordinates(mv: Move) -> Result<String, String> {
    Ok(format!(
        "{}{}",
        square_to_algebraic(mv.start)?,
        square_to_algebraic(mv.target)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_center_squares() {
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), 0);
        assert_eq!(algebraic_to_square("h1").expect("h1 should parse"), 63);
        assert_eq!(algebraic_to_square("e2").expect("e2 should parse"), 52);
        assert_eq!(square_to_algebraic(36).expect("36 should convert"), "e4");
        assert_eq!(square_to_algebraic(11).expect("11 should convert"), "d7");
    }

    #[test]
    fn invalid_squares_are_rejected() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(square_to_algebraic(64).is_err());
    }

    #[test]
    fn coordinate_moves() {
        assert_eq!(parse_coordinate_move("e2e4"), Ok(Move::new(52, 36)));
        assert_eq!(parse_coordinate_move(" E7-E5 "), Ok(Move::new(12, 28)));
        assert_eq!(parse_coordinate_move("e1 h1"), Ok(Move::new(60, 63)));
        assert!(parse_coordinate_move("e2e").is_err());
        assert_eq!(move_to_coordinates(Move::new(6, 21)).as_deref(), Ok("g8f6"));
    }
}
