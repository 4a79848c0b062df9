//! Error types for the rules engine and the session layer.
//!
//! The engine has one failure class, an illegal operation request, split by
//! cause so callers can tell a client what went wrong. A failed request never
//! mutates the board.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Reasons a requested move is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("square index {square} is off the board (must be 0-63)")]
    SquareOutOfRange { square: Square },

    #[error("no piece on start square {square}")]
    EmptySquare { square: Square },

    #[error("piece on square {square} does not belong to {to_move:?}, who is to move")]
    NotSideToMove { square: Square, to_move: Color },

    #[error("{target} is not a reachable target from {start}")]
    NotInMoveSet { start: Square, target: Square },

    #[error("moving from {start} to {target} leaves the own king in check")]
    MovesIntoCheck { start: Square, target: Square },

    #[error("castling from {start} passes through attacked square {transit}")]
    CastlesThroughCheck { start: Square, transit: Square },
}

/// Result type alias for board-mutating operations.
pub type MoveResult<T> = Result<T, IllegalMove>;

/// Outcomes of translating a client board snapshot back into a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("snapshots differ on {count} squares; no single move explains that")]
    UnexpectedDiffCount { count: usize },

    #[error("the differing squares do not form a recognisable {pattern} pattern")]
    UnrecognisedPattern { pattern: &'static str },
}

/// Errors surfaced by rooms and the room registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no room with code {code}")]
    UnknownRoom { code: String },

    #[error("room {code} already has two players")]
    RoomFull { code: String },

    #[error("the opponent has not joined yet")]
    OpponentMissing,

    #[error("the game has already finished")]
    GameFinished,

    #[error("the game is still in progress")]
    GameInProgress,

    #[error("it is not {color:?}'s turn")]
    NotYourTurn { color: Color },

    #[error("no pending {request} request from the opponent")]
    NoPendingRequest { request: &'static str },

    #[error("nothing to take back")]
    NothingToTakeBack,

    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    #[error(transparent)]
    Unreconcilable(#[from] ReconcileError),
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
