//! Invariants of the incremental board under long random move sequences.

use connect_four_ai::game::{Board, GameOutcome, COLS, ROWS};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

fn random_game(seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    while !board.is_terminal() {
        let moves = board.successors();
        let column = *moves.choose(&mut rng).unwrap();
        board.apply(column).unwrap();
    }
    board.history().to_vec()
}

#[test]
fn registry_stays_consistent_while_playing_and_rewinding() {
    for seed in 0..50 {
        let moves = random_game(seed);
        let mut board = Board::new();
        let mut snapshots = vec![board.clone()];

        for &column in &moves {
            board.apply(column).unwrap();
            board
                .lines()
                .validate()
                .unwrap_or_else(|e| panic!("seed {seed} after {column}: {e}"));
            snapshots.push(board.clone());
        }

        snapshots.pop();
        while let Some(expected) = snapshots.pop() {
            board.undo().unwrap();
            board
                .lines()
                .validate()
                .unwrap_or_else(|e| panic!("seed {seed} on undo: {e}"));
            assert_eq!(board, expected, "seed {seed}: undo diverged");
            assert_eq!(board.hash(), expected.hash());
        }
        assert_eq!(board, Board::new());
        assert!(board.lines().is_empty());
    }
}

#[test]
fn apply_then_undo_is_identity_everywhere() {
    for seed in 100..120 {
        let moves = random_game(seed);
        // Stop short of the end so there is something to try
        let prefix = &moves[..moves.len() / 2];
        let mut board = Board::from_moves(prefix).unwrap();
        let before = board.clone();

        for column in board.successors() {
            board.apply(column).unwrap();
            assert_ne!(board.hash(), before.hash());
            assert_eq!(board.undo().unwrap(), column);
            assert_eq!(board, before);
        }
    }
}

#[test]
fn hash_depends_only_on_contents() {
    // Same stones reached in different orders
    let a = Board::from_moves(&[0, 6, 1, 5, 2]).unwrap();
    let b = Board::from_moves(&[2, 5, 1, 6, 0]).unwrap();
    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.lines(), b.lines());
    assert_ne!(a.history(), b.history());
}

#[test]
fn finished_games_report_consistent_outcomes() {
    for seed in 200..260 {
        let moves = random_game(seed);
        let board = Board::from_moves(&moves).unwrap();

        match board.outcome() {
            Some(GameOutcome::Winner { player, line }) => {
                for &(col, row) in line {
                    assert_eq!(board.get(col, row).player(), Some(*player));
                }
                // The winner made the last move
                assert_eq!(board.current_player(), player.other());
            }
            Some(GameOutcome::Draw) => {
                assert!(board.is_full());
                assert_eq!(board.move_count(), COLS * ROWS);
            }
            None => panic!("seed {seed}: random game ended without an outcome"),
        }
        assert!(board.successors().is_empty() || board.winner().is_some());
    }
}
