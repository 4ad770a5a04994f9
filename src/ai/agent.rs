use std::time::Duration;

use crate::game::Board;

use super::search::{SearchConfig, SearchReport, SearchSession};

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column for `board.current_player()`.
    ///
    /// The board is borrowed mutably so searching agents can play moves out
    /// in place; it must be returned unchanged. `None` means the agent
    /// produced no move in time.
    fn select_action(&mut self, board: &mut Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Telemetry from the last decision, for agents that search.
    fn last_report(&self) -> Option<&SearchReport> {
        None
    }
}

/// The iterative-deepening alpha-beta player.
pub struct SearchAgent {
    session: SearchSession,
    budget: Duration,
}

impl SearchAgent {
    pub fn new(config: SearchConfig) -> Self {
        let budget = config.time_budget();
        SearchAgent {
            session: SearchSession::new(config),
            budget,
        }
    }
}

impl Agent for SearchAgent {
    fn select_action(&mut self, board: &mut Board) -> Option<usize> {
        let player = board.current_player();
        self.session.decide(board, player, self.budget)
    }

    fn name(&self) -> &str {
        "Alpha-beta"
    }

    fn last_report(&self) -> Option<&SearchReport> {
        Some(self.session.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, Player};

    fn quick() -> SearchConfig {
        SearchConfig {
            time_budget_ms: 10_000,
            max_depth: Some(4),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn selects_legal_action() {
        let mut agent = SearchAgent::new(quick());
        let mut board = Board::new();
        let action = agent.select_action(&mut board).unwrap();
        assert!(board.successors().contains(&action), "Action {action} is not legal");
        assert_eq!(agent.last_report().unwrap().depth, 4);
    }

    #[test]
    fn takes_winning_move() {
        // Yellow has 0,1,2 on the bottom row; column 3 wins
        let mut board = Board::from_moves(&[0, 0, 1, 1, 2, 2]).unwrap();
        let mut agent = SearchAgent::new(quick());
        assert_eq!(agent.select_action(&mut board), Some(3));
        assert_eq!(agent.last_report().unwrap().score, 999);
    }

    #[test]
    fn blocks_opponent_win() {
        // Yellow has [0,1,2] on the bottom row. Red must play col 3 to block.
        let mut board = Board::from_moves(&[0, 6, 1, 6, 2]).unwrap();
        let mut agent = SearchAgent::new(quick());
        assert_eq!(agent.select_action(&mut board), Some(3));
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 5;
        let mut search_wins = 0;

        for search_player in [Player::Yellow, Player::Red] {
            for game in 0..games_per_color {
                let mut searcher = SearchAgent::new(quick());
                let mut random = RandomAgent::seeded(game);
                let mut board = Board::new();

                while !board.is_terminal() {
                    let action = if board.current_player() == search_player {
                        searcher.select_action(&mut board)
                    } else {
                        random.select_action(&mut board)
                    };
                    board.apply(action.unwrap()).unwrap();
                }

                if let Some(GameOutcome::Winner { player, .. }) = board.outcome() {
                    if *player == search_player {
                        search_wins += 1;
                    }
                }
            }
        }

        assert!(
            search_wins >= 8,
            "Search should beat random almost always, won {search_wins}/10"
        );
    }

    #[test]
    fn name_is_alpha_beta() {
        let agent = SearchAgent::new(SearchConfig::default());
        assert_eq!(agent.name(), "Alpha-beta");
    }
}
