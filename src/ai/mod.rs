//! Automated players: the line-based evaluator, the search tree used for move
//! ordering, the iterative-deepening alpha-beta search, and a random baseline.

mod agent;
pub mod eval;
mod random;
pub mod search;
pub mod tree;

pub use agent::{Agent, SearchAgent};
pub use eval::evaluate;
pub use random::RandomAgent;
pub use search::{SearchConfig, SearchReport, SearchSession};
pub use tree::{Branch, SearchNode};
