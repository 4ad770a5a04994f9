//! End-to-end behavior of the timed search on hand-picked positions.

use std::time::Duration;

use connect_four_ai::ai::{SearchConfig, SearchSession};
use connect_four_ai::game::{Board, Player};

fn session(max_depth: Option<usize>) -> SearchSession {
    SearchSession::new(SearchConfig {
        time_budget_ms: 10_000,
        max_depth,
        ..SearchConfig::default()
    })
}

#[test]
fn near_full_board_searches_to_the_depth_cap() {
    let moves = [
        2, 0, 1, 3, 4, 2, 4, 4, 2, 1, 5, 6, 4, 4, 5, 5, 5, 0, 3, 6, 6, 6, 5, 6, 4, 3, 3, 3, 3,
        0, 5, 6, 0, 0,
    ];
    let mut board = Board::from_moves(&moves).unwrap();
    assert_eq!(board.empty_cells(), 8);
    assert_eq!(board.current_player(), Player::Yellow);
    let before = board.clone();

    let mut search = session(None);
    let column = search.decide(&mut board, Player::Yellow, Duration::from_secs(10));

    assert_eq!(column, Some(2));
    let report = search.report();
    assert!(!report.timed_out);
    assert_eq!(report.depth, 8 + 7);
    assert_eq!(report.score, 999);
    assert_eq!(board, before);
}

#[test]
fn looks_ahead_past_a_losing_reply() {
    // Column 3 scores best statically but hands Yellow a win on top of it
    let mut board = Board::from_moves(&[1, 0, 0, 2, 1, 6, 2]).unwrap();
    assert_eq!(board.current_player(), Player::Red);

    let mut shallow = session(Some(1));
    assert_eq!(
        shallow.decide(&mut board, Player::Red, Duration::from_secs(10)),
        Some(3)
    );

    for depth in 2..=4 {
        let mut search = session(Some(depth));
        let column = search.decide(&mut board, Player::Red, Duration::from_secs(10));
        assert!(column.is_some());
        assert_ne!(column, Some(3), "depth {depth} still plays into the trap");
    }
}

#[test]
fn timeout_mid_search_rewinds_the_board() {
    let mut board = Board::from_moves(&[3, 3, 2]).unwrap();
    let before = board.clone();

    let mut search = session(None);
    let column = search.decide(&mut board, Player::Red, Duration::from_millis(5));

    let report = search.report();
    assert!(report.timed_out, "an open position cannot be solved in 5ms");
    assert_eq!(board, before);
    assert_eq!(board.hash(), before.hash());
    if let Some(column) = column {
        assert!(board.successors().contains(&column));
        assert_eq!(report.best_move, Some(column));
    }
}

#[test]
fn session_is_reusable_across_moves() {
    let mut board = Board::new();
    let mut search = session(Some(3));

    for _ in 0..6 {
        let player = board.current_player();
        let column = search
            .decide(&mut board, player, Duration::from_secs(10))
            .unwrap();
        board.apply(column).unwrap();
        assert_eq!(search.report().depth, 3);

        let tree = search.last_tree().unwrap();
        let values: Vec<i32> = tree.branches().iter().map(|b| b.node.value()).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }
    assert_eq!(board.move_count(), 6);
}
