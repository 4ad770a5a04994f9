use crate::game::{Board, GameOutcome, Player};

/// Score of a win found at depth 0; deeper wins score less.
pub const WIN_SCORE: i32 = 1000;

/// Reward for an open line of the given length.
fn line_score(len: usize) -> i32 {
    match len {
        2 => 1,
        3 => 4,
        _ => 0,
    }
}

/// Evaluate `board` from `player`'s point of view.
///
/// Terminal positions score `±(WIN_SCORE - depth)` so that faster wins and
/// slower losses are preferred; draws score 0. Otherwise every live line on
/// the board is counted once, positively for `player`'s lines and
/// negatively for the opponent's.
pub fn evaluate(board: &Board, player: Player, depth: usize) -> i32 {
    match board.outcome() {
        Some(GameOutcome::Draw) => return 0,
        Some(GameOutcome::Winner { player: winner, .. }) => {
            let score = WIN_SCORE - depth as i32;
            return if *winner == player { score } else { -score };
        }
        None => {}
    }

    board
        .lines()
        .iter()
        .map(|(_, line)| {
            let score = line_score(line.len());
            if line.owner() == player {
                score
            } else {
                -score
            }
        })
        .sum()
}
