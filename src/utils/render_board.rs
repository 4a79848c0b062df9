//! Terminal-oriented Unicode board renderer.
//!
//! Used by the hot-seat binary and handy in test failure output.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Render the board to a Unicode string, seen from `perspective`'s side.
///
/// The last move's squares are bracketed.
pub fn render_board(board: &Board, perspective: Color) -> String {
    let rows: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };

    let header: String = files
        .iter()
        .map(|&file| format!(" {} ", char::from(b'a' + file)))
        .collect();

    let mut out = String::new();
    out.push_str("  ");
    out.push_str(&header);
    out.push('\n');

    for &row in &rows {
        let rank_char = char::from(b'8' - row);
        out.push(rank_char);
        out.push(' ');

        for &file in &files {
            let square = row * 8 + file;
            let glyph = piece_to_unicode(board.piece_at(square)).unwrap_or('·');
            let highlighted = board.moved_from == Some(square) || board.moved_to == Some(square);
            if highlighted {
                out.push('[');
                out.push(glyph);
                out.push(']');
            } else {
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(&header);

    out
}

pub fn piece_to_unicode(piece: Piece) -> Option<char> {
    let glyph = match (piece.color()?, piece.piece_type()) {
        (Color::White, PieceType::Pawn) => '♙',
        (Color::White, PieceType::Knight) => '♘',
        (Color::White, PieceType::Bishop) => '♗',
        (Color::White, PieceType::Rook) => '♖',
        (Color::White, PieceType::Queen) => '♕',
        (Color::White, PieceType::King) => '♔',
        (Color::Black, PieceType::Pawn) => '♟',
        (Color::Black, PieceType::Knight) => '♞',
        (Color::Black, PieceType::Bishop) => '♝',
        (Color::Black, PieceType::Rook) => '♜',
        (Color::Black, PieceType::Queen) => '♛',
        (Color::Black, PieceType::King) => '♚',
        (_, PieceType::None) => return None,
    };
    Some(glyph)
}
