use crate::game::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &mut Board) -> Option<usize> {
        let actions = board.successors();
        if actions.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..actions.len());
        Some(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::new();
        let mut board = Board::from_moves(&[0, 0, 0, 0, 0, 0]).unwrap();
        let legal = board.successors();

        for _ in 0..100 {
            let action = agent.select_action(&mut board).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent1 = RandomAgent::seeded(1);
        let mut agent2 = RandomAgent::seeded(2);
        let mut board = Board::new();

        let mut turn = 0;
        while !board.is_terminal() {
            let action = if turn % 2 == 0 {
                agent1.select_action(&mut board)
            } else {
                agent2.select_action(&mut board)
            };
            board.apply(action.unwrap()).unwrap();
            board.lines().validate().unwrap();
            turn += 1;
        }

        assert!(board.outcome().is_some());
    }

    #[test]
    fn test_seeded_agents_agree() {
        let mut board = Board::new();
        let picks = |seed| {
            let mut agent = RandomAgent::seeded(seed);
            (0..10)
                .map(|_| agent.select_action(&mut Board::new()))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
        assert!(RandomAgent::seeded(0).select_action(&mut board).is_some());
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
