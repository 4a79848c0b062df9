use std::thread;

use crate::game_state::board::Board;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    /// Tally the move that was just committed on `board`.
    fn record_leaf(&mut self, board: &Board) {
        self.nodes += 1;

        let Some(record) = board.last_move() else {
            return;
        };

        if let Some((square, _)) = record.captured {
            self.captures += 1;
            if square != record.mv.target {
                self.en_passant += 1;
            }
        }
        if record.is_castling() {
            self.castles += 1;
        }
        if record.is_promotion() {
            self.promotions += 1;
        }
        if board.in_check(board.color_to_move()) {
            self.checks += 1;
        }
        if board.checkmate {
            self.checkmates += 1;
        }
    }
}

/// Count leaf nodes and leaf move categories `depth` plies below `board`.
///
/// Moves are committed and undone on a private copy of the board, so the
/// argument is left untouched.
pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    perft_single_thread(board, depth)
}

pub fn perft_single_thread(board: &Board, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    let mut work = board.clone();
    perft_recurse(&mut work, depth, &mut total);
    total
}

/// Same totals as [`perft_single_thread`], with one worker per root move.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft_single_thread(board, depth);
    }

    let root_moves = all_legal_moves(&board.position);
    let mut total = PerftCounts::default();

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .into_iter()
            .map(|mv| {
                let mut work = board.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    if apply_move(&mut work, mv).is_ok() {
                        perft_recurse(&mut work, depth - 1, &mut local);
                    }
                    local
                })
            })
            .collect();

        for handle in handles {
            // A worker only panics on a bug in move generation; surface it.
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
    });

    total
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) {
    for mv in all_legal_moves(&board.position) {
        if apply_move(board, mv).is_err() {
            continue;
        }

        if depth == 1 {
            counts.record_leaf(board);
        } else {
            perft_recurse(board, depth - 1, counts);
        }

        undo_move(board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Position;
    use crate::game_state::chess_types::{Color, Move, Piece, PieceType};

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&Board::new_game(), 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_initial_position_shallow_depths() {
        let board = Board::new_game();
        assert_eq!(perft(&board, 1).nodes, 20);
        assert_eq!(perft(&board, 2).nodes, 400);
    }

    #[test]
    fn perft_initial_position_depth_three() {
        let board = Board::new_game();
        let counts = perft(&board, 3);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
        assert_eq!(board, Board::new_game());
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let board = Board::new_game();
        assert_eq!(perft_multi_threaded(&board, 3), perft_single_thread(&board, 3));
    }

    #[test]
    fn leaf_categories_are_counted() {
        let mut position = Position::empty(Color::White);
        position.set_piece(60, Piece::new(PieceType::King, Color::White));
        position.set_piece(63, Piece::new(PieceType::Rook, Color::White));
        position.set_piece(9, Piece::new(PieceType::Pawn, Color::White));
        position.set_piece(16, Piece::new(PieceType::King, Color::Black));
        position.castling_rights.white_kingside = true;
        let board = Board::from_position(position);

        let counts = perft(&board, 1);
        assert_eq!(counts.castles, 1);
        assert_eq!(counts.promotions, 1);

        let mut promoted = board.clone();
        apply_move(&mut promoted, Move::new(9, 1)).expect("b7b8 is legal");
        let record = promoted.last_move().expect("move recorded");
        assert!(record.is_promotion());
        assert_eq!(record.placed_piece, Piece::new(PieceType::Queen, Color::White));
    }
}
