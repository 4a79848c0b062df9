use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use tandem_chess::game::reconcile::reconcile_external_board;
use tandem_chess::game::rules_engine::ChessGame;
use tandem_chess::game_state::board::{Board, Position, Termination};
use tandem_chess::game_state::chess_types::{CastlingRights, Color, Move, Piece, PieceType};
use tandem_chess::move_generation::legal_move_checks::is_in_check;

const SEEDS: [u64; 4] = [1, 7, 42, 2024];
const MAX_PLIES: usize = 120;

/// Play random legal moves until the game ends or `MAX_PLIES` is reached,
/// calling `visit` with the board before and after every move.
fn random_playout(seed: u64, mut visit: impl FnMut(&Board, Move, &Board)) -> ChessGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = ChessGame::new_game();

    for _ in 0..MAX_PLIES {
        if game.is_finished() {
            break;
        }
        let moves = game.all_legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };

        let before = game.board().clone();
        game.apply_move(mv.start, mv.target)
            .unwrap_or_else(|err| panic!("generated move {mv:?} rejected: {err}"));
        visit(&before, mv, game.board());
    }

    game
}

fn rights_as_array(rights: CastlingRights) -> [bool; 4] {
    [
        rights.white_kingside,
        rights.white_queenside,
        rights.black_kingside,
        rights.black_queenside,
    ]
}

#[test]
fn p1_apply_succeeds_exactly_for_generated_moves() {
    for seed in SEEDS {
        let mut checked = 0;
        random_playout(seed, |_, _, after| {
            if after.ply() % 9 != 0 || after.is_game_finished {
                return;
            }
            checked += 1;

            let game = ChessGame::from_board(after.clone());
            for start in 0..64u8 {
                let legal = game.legal_moves(start);
                for target in 0..64u8 {
                    let mut trial = game.clone();
                    let accepted = trial.try_move(start, target);
                    assert_eq!(
                        accepted,
                        legal.contains(&target),
                        "seed {seed}: {start}->{target} acceptance disagrees with generation"
                    );
                    if !accepted {
                        assert_eq!(trial, game, "rejected move mutated the board");
                    }
                }
            }
        });
        assert!(checked > 0, "seed {seed} produced no sampled positions");
    }
}

#[test]
fn p2_mover_is_never_left_in_check() {
    for seed in SEEDS {
        random_playout(seed, |before, _, after| {
            let mover = before.color_to_move();
            assert!(!is_in_check(&after.position, mover));
            assert!(!after.in_check(mover));
        });
    }
}

#[test]
fn p3_undo_restores_every_field() {
    for seed in SEEDS {
        random_playout(seed, |before, mv, after| {
            let mut game = ChessGame::from_board(after.clone());
            let record = game.undo().expect("a move was just played");
            assert_eq!(record.mv, mv);
            assert_eq!(game.board(), before);
        });
    }
}

#[test]
fn p3_undo_all_the_way_back_to_the_start() {
    let mut game = random_playout(99, |_, _, _| {});
    while game.undo().is_some() {}
    assert_eq!(game, ChessGame::new_game());
}

#[test]
fn p4_en_passant_window_lasts_one_move() {
    let mut position = Position::empty(Color::Black);
    position.set_piece(60, Piece::new(PieceType::King, Color::White));
    position.set_piece(4, Piece::new(PieceType::King, Color::Black));
    position.set_piece(28, Piece::new(PieceType::Pawn, Color::White));
    position.set_piece(11, Piece::new(PieceType::Pawn, Color::Black));
    position.set_piece(15, Piece::new(PieceType::Pawn, Color::Black));
    let start = ChessGame::from_position(position);

    // d7-d5 next to the e5 pawn: exd6 is available immediately.
    let mut immediate = start.clone();
    immediate.apply_move(11, 27).expect("d7d5");
    assert!(immediate.legal_moves(28).contains(&19));
    immediate.apply_move(28, 19).expect("exd6 e.p.");
    assert!(immediate.board().piece_at(27).is_none());

    // One waiting move each and the window has closed.
    let mut delayed = start;
    delayed.apply_move(11, 27).expect("d7d5");
    delayed.apply_move(60, 59).expect("Ke1d1");
    delayed.apply_move(15, 23).expect("h7h6");
    assert!(!delayed.legal_moves(28).contains(&19));
    assert!(!delayed.try_move(28, 19));
}

#[test]
fn p5_castling_rights_never_come_back() {
    for seed in SEEDS {
        random_playout(seed, |before, _, after| {
            let old = rights_as_array(before.position.castling_rights);
            let new = rights_as_array(after.position.castling_rights);
            for (was, is) in old.into_iter().zip(new) {
                assert!(was || !is, "seed {seed}: a castling right was restored");
            }
        });
    }
}

#[test]
fn p6_no_legal_moves_means_exactly_one_of_mate_or_stalemate() {
    for seed in 0..24u64 {
        let game = random_playout(seed, |_, _, _| {});
        let board = game.board();
        let to_move = board.color_to_move();

        if game.has_legal_moves(to_move) {
            assert!(!board.checkmate);
            assert!(!matches!(board.termination, Some(Termination::Stalemate)));
            continue;
        }

        let in_check = game.is_in_check(to_move);
        assert!(board.is_game_finished);
        assert_eq!(board.checkmate, in_check);
        assert_eq!(board.stalemate, !in_check);
    }
}

#[test]
fn reconciled_snapshots_replay_the_same_move() {
    for seed in SEEDS {
        random_playout(seed, |before, mv, after| {
            match reconcile_external_board(&before.position, &after.position) {
                Ok(found) => assert_eq!(found, mv, "seed {seed}"),
                Err(err) => panic!("seed {seed}: {mv:?} not reconciled: {err}"),
            }
        });
    }
}
