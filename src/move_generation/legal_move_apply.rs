//! Move application and undo.
//!
//! Moves are first played on a copy of the position. Only when the copy is
//! verified (pseudo-legal, castling transit safe, own king not left in check)
//! is it committed to the board together with an undo record, so a rejected
//! move leaves the board untouched.

use tracing::debug;

use crate::errors::{IllegalMove, MoveResult};
use crate::game_state::board::{Board, Position};
use crate::game_state::chess_rules::{
    castle_for_corner, pawn_forward, pawn_home_rank, promotion_rank, CastleGeometry, CastleKind,
};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::moves_from;
use crate::move_generation::legal_move_shared::GenerationMode;
use crate::move_generation::termination::update_termination;

/// What playing a move did to the squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    pub moved_piece: Piece,
    pub placed_piece: Piece,
    pub captured: Option<(Square, Piece)>,
    pub castled: Option<CastleKind>,
}

/// Play `mv` for the side to move without checking that it is pseudo-legal.
///
/// Handles castling (including the transit-square attack test), en passant,
/// queen promotion, the en passant target, and castling rights. The side to
/// move is left unchanged.
pub fn play_move(position: &mut Position, mv: Move) -> MoveResult<MoveEffects> {
    let side = position.color_to_move;
    let piece = position.piece_at(mv.start);

    let effects = match castling_geometry(position, mv, side) {
        Some(castle) => play_castle(position, castle)?,
        None => play_ordinary(position, mv, side, piece),
    };

    position.en_passant_square = if piece.is_type(PieceType::Pawn)
        && mv.start.abs_diff(mv.target) == 16
        && rank_of(mv.start) == pawn_home_rank(side)
    {
        Some((mv.start as i16 + pawn_forward(side) as i16) as Square)
    } else {
        None
    };

    if piece.is_type(PieceType::King) {
        position.castling_rights.clear_color(side);
    }
    // Any move from or onto a corner clears that corner's right.
    for square in [mv.start, mv.target] {
        if let Some(castle) = castle_for_corner(square) {
            position.castling_rights.revoke(castle.kind);
        }
    }

    Ok(effects)
}

/// Castling is a king moving onto its own rook on a corner.
fn castling_geometry(position: &Position, mv: Move, side: Color) -> Option<&'static CastleGeometry> {
    castle_for_corner(mv.target).filter(|castle| {
        castle.color == side
            && castle.king_from == mv.start
            && position.piece_at(mv.start) == Piece::new(PieceType::King, side)
            && position.piece_at(mv.target) == Piece::new(PieceType::Rook, side)
    })
}

fn play_castle(position: &mut Position, castle: &CastleGeometry) -> MoveResult<MoveEffects> {
    let king = Piece::new(PieceType::King, castle.color);
    let rook = Piece::new(PieceType::Rook, castle.color);

    let mut transit = *position;
    transit.set_piece(castle.king_from, Piece::NONE);
    transit.set_piece(castle.king_transit, king);
    if is_in_check(&transit, castle.color) {
        return Err(IllegalMove::CastlesThroughCheck {
            start: castle.king_from,
            transit: castle.king_transit,
        });
    }

    position.set_piece(castle.king_from, Piece::NONE);
    position.set_piece(castle.rook_from, Piece::NONE);
    position.set_piece(castle.king_to, king);
    position.set_piece(castle.rook_to, rook);

    Ok(MoveEffects {
        moved_piece: king,
        placed_piece: king,
        captured: None,
        castled: Some(castle.kind),
    })
}

fn play_ordinary(position: &mut Position, mv: Move, side: Color, piece: Piece) -> MoveEffects {
    let on_target = position.piece_at(mv.target);
    let mut captured = (!on_target.is_none()).then_some((mv.target, on_target));

    if piece.is_type(PieceType::Pawn)
        && on_target.is_none()
        && position.en_passant_square == Some(mv.target)
    {
        let behind = (mv.target as i16 - pawn_forward(side) as i16) as Square;
        captured = Some((behind, position.piece_at(behind)));
        position.set_piece(behind, Piece::NONE);
    }

    let placed_piece =
        if piece.is_type(PieceType::Pawn) && rank_of(mv.target) == promotion_rank(side) {
            Piece::new(PieceType::Queen, side)
        } else {
            piece
        };

    position.set_piece(mv.target, placed_piece);
    position.set_piece(mv.start, Piece::NONE);

    MoveEffects {
        moved_piece: piece,
        placed_piece,
        captured,
        castled: None,
    }
}

/// Verify `mv` for the side to move without committing anything.
///
/// The move is trusted to be pseudo-legal; the check is that castling does
/// not cross an attacked square and that the mover's king is not left in check.
#[inline]
pub fn simulate_move(position: &Position, mv: Move) -> MoveResult<MoveEffects> {
    play_verified(position, mv).map(|(_, effects)| effects)
}

/// Play `mv` on a copy of `position` and return the copy if the mover's king is safe.
fn play_verified(position: &Position, mv: Move) -> MoveResult<(Position, MoveEffects)> {
    let side = position.color_to_move;
    let mut next = *position;
    let effects = play_move(&mut next, mv)?;
    if is_in_check(&next, side) {
        return Err(IllegalMove::MovesIntoCheck {
            start: mv.start,
            target: mv.target,
        });
    }
    Ok((next, effects))
}

fn validate_request(position: &Position, mv: Move) -> MoveResult<()> {
    for square in [mv.start, mv.target] {
        if square >= 64 {
            return Err(IllegalMove::SquareOutOfRange { square });
        }
    }

    let piece = position.piece_at(mv.start);
    if piece.is_none() {
        return Err(IllegalMove::EmptySquare { square: mv.start });
    }
    if !piece.is_color(position.color_to_move) {
        return Err(IllegalMove::NotSideToMove {
            square: mv.start,
            to_move: position.color_to_move,
        });
    }
    if !moves_from(position, mv.start, GenerationMode::PseudoLegal).contains(&mv) {
        return Err(IllegalMove::NotInMoveSet {
            start: mv.start,
            target: mv.target,
        });
    }

    Ok(())
}

/// Commit `mv` to the board.
///
/// On success the move is recorded for undo, the side to move switches, the
/// check flags are recomputed for the new side to move, and game termination
/// is evaluated. On failure the board is unchanged.
pub fn apply_move(board: &mut Board, mv: Move) -> MoveResult<()> {
    validate_request(&board.position, mv)?;

    let side = board.position.color_to_move;
    let (mut next, effects) = play_verified(&board.position, mv)?;

    let record = UndoState {
        mv,
        mover: side,
        moved_piece: effects.moved_piece,
        placed_piece: effects.placed_piece,
        captured: effects.captured,
        castled: effects.castled,
        prev_castling_rights: board.position.castling_rights,
        prev_en_passant_square: board.position.en_passant_square,
        prev_white_in_check: board.white_in_check,
        prev_black_in_check: board.black_in_check,
        prev_is_game_finished: board.is_game_finished,
        prev_checkmate: board.checkmate,
        prev_stalemate: board.stalemate,
        prev_termination: board.termination,
        prev_moved_from: board.moved_from,
        prev_moved_to: board.moved_to,
        prev_white_advantage: board.white_advantage,
    };

    next.switch_color();

    board.repetition_history.push(board.position.squares);
    board.undo_stack.push(record);
    board.position = next;

    if let Some((_, piece)) = effects.captured {
        board.white_advantage -= piece.value();
    }
    board.white_advantage += effects.placed_piece.value() - effects.moved_piece.value();

    board.moved_from = Some(mv.start);
    board.moved_to = Some(mv.target);
    board.white_in_check = false;
    board.black_in_check = false;

    update_termination(board);

    debug!(
        start = mv.start,
        target = mv.target,
        ?side,
        captured = effects.captured.is_some(),
        castled = effects.castled.is_some(),
        "move applied"
    );

    Ok(())
}

/// Take back the most recent committed move. Returns the removed record, or
/// `None` when there is no history.
pub fn undo_move(board: &mut Board) -> Option<UndoState> {
    let record = board.undo_stack.pop()?;
    board.repetition_history.pop();

    let position = &mut board.position;
    position.color_to_move = record.mover;

    match record.castled {
        Some(kind) => {
            let castle = kind.geometry();
            position.set_piece(castle.king_to, Piece::NONE);
            position.set_piece(castle.rook_to, Piece::NONE);
            position.set_piece(castle.king_from, Piece::new(PieceType::King, castle.color));
            position.set_piece(castle.rook_from, Piece::new(PieceType::Rook, castle.color));
        }
        None => {
            position.set_piece(record.mv.target, Piece::NONE);
            position.set_piece(record.mv.start, record.moved_piece);
            if let Some((square, piece)) = record.captured {
                position.set_piece(square, piece);
            }
        }
    }

    position.castling_rights = record.prev_castling_rights;
    position.en_passant_square = record.prev_en_passant_square;

    board.white_in_check = record.prev_white_in_check;
    board.black_in_check = record.prev_black_in_check;
    board.is_game_finished = record.prev_is_game_finished;
    board.checkmate = record.prev_checkmate;
    board.stalemate = record.prev_stalemate;
    board.termination = record.prev_termination;
    board.moved_from = record.prev_moved_from;
    board.moved_to = record.prev_moved_to;
    board.white_advantage = record.prev_white_advantage;

    debug!(start = record.mv.start, target = record.mv.target, "move undone");

    Some(record)
}
