//! Crate root module declarations for the Tandem Chess rules engine.
//!
//! This file exposes all top-level subsystems (board state, per-piece move
//! tables, move generation and application, the rules-engine facade, the
//! two-player session layer, and utility helpers) so the binary, tests, and
//! external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod captures;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod perft;
    pub mod termination;
}

pub mod game {
    pub mod reconcile;
    pub mod rules_engine;
}

pub mod session {
    pub mod clock;
    pub mod config;
    pub mod player;
    pub mod registry;
    pub mod room;
}

pub mod utils {
    pub mod algebraic;
    pub mod render_board;
    pub mod snapshot;
}
