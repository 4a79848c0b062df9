//! Translate a client-submitted board snapshot back into a move.
//!
//! The session layer receives the client's full resulting placement. The
//! squares that differ from the authoritative position identify the move:
//! two squares for an ordinary move, four for castling, three for en passant.
//! The move returned here is still re-validated by the rules engine.

use crate::errors::ReconcileError;
use crate::game_state::board::Position;
use crate::game_state::chess_types::{Move, PieceType, Square};

pub fn reconcile_external_board(
    prior: &Position,
    proposed: &Position,
) -> Result<Move, ReconcileError> {
    let diff: Vec<Square> = (0..64)
        .filter(|&square| prior.piece_at(square) != proposed.piece_at(square))
        .collect();

    match diff.as_slice() {
        &[a, b] => ordinary_move(proposed, a, b),
        &[a, b, c] => en_passant_move(prior, [a, b, c]),
        &[a, b, c, d] => castling_move(prior, proposed, [a, b, c, d]),
        _ => Err(ReconcileError::UnexpectedDiffCount { count: diff.len() }),
    }
}

/// The start square is the one left empty.
fn ordinary_move(proposed: &Position, a: Square, b: Square) -> Result<Move, ReconcileError> {
    match (proposed.is_empty(a), proposed.is_empty(b)) {
        (true, false) => Ok(Move::new(a, b)),
        (false, true) => Ok(Move::new(b, a)),
        _ => Err(ReconcileError::UnrecognisedPattern {
            pattern: "ordinary move",
        }),
    }
}

/// One differing square is the prior en passant target; the captured pawn sits
/// one rank away from it, and the capturing pawn started on the remaining square.
fn en_passant_move(prior: &Position, diff: [Square; 3]) -> Result<Move, ReconcileError> {
    let unrecognised = ReconcileError::UnrecognisedPattern {
        pattern: "en passant",
    };

    let Some(target) = prior.en_passant_square.filter(|ep| diff.contains(ep)) else {
        return Err(unrecognised);
    };

    let mut others = diff.iter().copied().filter(|&square| square != target);
    let (Some(first), Some(second)) = (others.next(), others.next()) else {
        return Err(unrecognised);
    };

    let start = match (first.abs_diff(target) == 8, second.abs_diff(target) == 8) {
        (true, false) => second,
        (false, true) => first,
        _ => return Err(unrecognised),
    };

    Ok(Move::new(start, target))
}

/// King and rook change squares and exactly two of the four squares are
/// empty before and after. Encoded king square to rook square.
fn castling_move(
    prior: &Position,
    proposed: &Position,
    diff: [Square; 4],
) -> Result<Move, ReconcileError> {
    let prior_shape = castling_shape(prior, &diff);
    let proposed_shape = castling_shape(proposed, &diff);

    match (prior_shape, proposed_shape) {
        (Some((king, rook)), Some(_)) => Ok(Move::new(king, rook)),
        _ => Err(ReconcileError::UnrecognisedPattern { pattern: "castling" }),
    }
}

/// King square and rook square among `diff`, if the four squares hold one
/// king, one rook, and two empty squares.
fn castling_shape(position: &Position, diff: &[Square; 4]) -> Option<(Square, Square)> {
    let mut king = None;
    let mut rook = None;
    let mut empty = 0;

    for &square in diff {
        match position.piece_at(square).piece_type() {
            PieceType::King if king.is_none() => king = Some(square),
            PieceType::Rook if rook.is_none() => rook = Some(square),
            PieceType::None => empty += 1,
            _ => return None,
        }
    }

    match (king, rook, empty) {
        (Some(king), Some(rook), 2) => Some((king, rook)),
        _ => None,
    }
}
