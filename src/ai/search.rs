//! Iterative-deepening minimax with alpha-beta pruning.
//!
//! Each round searches one ply deeper than the last. A round starts with an
//! empty transposition table and orders moves using the tree recorded by the
//! previous round. The wall clock is checked on entry to every node; when the
//! budget runs out the board is rewound in one step and the last completed
//! round's move is used.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::eval::evaluate;
use super::tree::SearchNode;
use crate::game::{Board, Player};

/// Bound wider than any reachable score.
const INFINITY: i32 = 100_000;

/// Search limits, loadable from the `[search]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget per decision in milliseconds.
    pub time_budget_ms: u64,
    /// Extra plies allowed beyond the number of empty cells.
    pub depth_slack: usize,
    /// Optional hard cap on the iterative-deepening depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_budget_ms: 2_000,
            depth_slack: 7,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// Telemetry of the most recent decision, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<usize>,
    /// Value of the last completed round, from the searching player's side.
    pub score: i32,
    /// Nodes entered across all rounds.
    pub nodes: u64,
    /// Depth of the last completed round.
    pub depth: usize,
    pub elapsed: Duration,
    pub timed_out: bool,
}

/// Raised on node entry once the time budget is spent. By then the board
/// has already been rewound to the root, so callers just propagate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchTimeout;

type Scored = (i32, Option<usize>);

/// Search state for one AI player.
///
/// Construct once and call [`decide`](Self::decide) on each of the AI's
/// turns. All per-decision state (transposition table, previous tree, node
/// counter, clock) is reset at the start of every call; only the config and
/// the last [`SearchReport`] persist between calls.
#[derive(Debug)]
pub struct SearchSession {
    config: SearchConfig,
    player: Player,
    budget: Duration,
    started: Instant,
    max_depth: usize,
    nodes: u64,
    transpositions: HashMap<u64, Scored>,
    previous_tree: Option<SearchNode>,
    report: SearchReport,
}

impl SearchSession {
    pub fn new(config: SearchConfig) -> Self {
        let budget = config.time_budget();
        SearchSession {
            config,
            player: Player::Red,
            budget,
            started: Instant::now(),
            max_depth: 1,
            nodes: 0,
            transpositions: HashMap::new(),
            previous_tree: None,
            report: SearchReport::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Telemetry of the last decision.
    pub fn report(&self) -> &SearchReport {
        &self.report
    }

    /// Tree of the last completed round, if any.
    pub fn last_tree(&self) -> Option<&SearchNode> {
        self.previous_tree.as_ref()
    }

    /// Choose a column for `player`, who must be the side to move.
    ///
    /// Returns the move of the deepest round that finished inside `budget`,
    /// or `None` if not even the depth-1 round did. `board` is left exactly
    /// as it was passed in.
    pub fn decide(&mut self, board: &mut Board, player: Player, budget: Duration) -> Option<usize> {
        debug_assert_eq!(board.current_player(), player, "search for the side not to move");

        self.player = player;
        self.budget = budget;
        self.started = Instant::now();
        self.nodes = 0;
        self.previous_tree = None;
        self.report = SearchReport::default();

        let mut depth_cap = board.empty_cells() + self.config.depth_slack;
        if let Some(limit) = self.config.max_depth {
            depth_cap = depth_cap.min(limit);
        }

        self.max_depth = 1;
        while self.max_depth <= depth_cap {
            let prior = self.previous_tree.take();

            match self.search_round(board, prior.as_ref()) {
                Ok((root, (value, column))) => {
                    self.previous_tree = Some(root);
                    self.report.best_move = column;
                    self.report.score = value;
                    self.report.depth = self.max_depth;
                    debug!(
                        "depth {} done: move {:?}, score {}, {} nodes",
                        self.max_depth, column, value, self.nodes
                    );
                    self.max_depth += 1;
                }
                Err(SearchTimeout) => {
                    // Keep the last completed tree for inspection.
                    self.previous_tree = prior;
                    self.report.timed_out = true;
                    debug!("depth {} abandoned after {:?}", self.max_depth, budget);
                    break;
                }
            }
        }

        self.report.nodes = self.nodes;
        self.report.elapsed = self.started.elapsed();

        if self.report.best_move.is_none() && self.report.timed_out {
            warn!("search timed out before completing depth 1");
        }
        info!(
            "{} plays {:?} (score {}, depth {}, {} nodes, {:?})",
            player.name(),
            self.report.best_move,
            self.report.score,
            self.report.depth,
            self.report.nodes,
            self.report.elapsed
        );

        self.report.best_move
    }

    /// One iterative-deepening round at `self.max_depth`, starting from an
    /// empty transposition table.
    fn search_round(
        &mut self,
        board: &mut Board,
        prior: Option<&SearchNode>,
    ) -> Result<(SearchNode, Scored), SearchTimeout> {
        self.transpositions.clear();
        let mut root = SearchNode::new();
        let scored = self.minimax(board, &mut root, prior, -INFINITY, INFINITY, 0)?;
        root.set_value(scored.0);
        Ok((root, scored))
    }

    /// Alpha-beta search below `board`'s current position.
    ///
    /// `depth` is the number of moves applied since the round's root; even
    /// depths maximize for `self.player`. `prior` is the node for the same
    /// position from the previous round and only influences move order.
    fn minimax(
        &mut self,
        board: &mut Board,
        node: &mut SearchNode,
        prior: Option<&SearchNode>,
        mut alpha: i32,
        mut beta: i32,
        depth: usize,
    ) -> Result<Scored, SearchTimeout> {
        if self.started.elapsed() > self.budget {
            // Rewind the whole path here; unwinding frames must not undo.
            for _ in 0..depth {
                retract(board);
            }
            return Err(SearchTimeout);
        }

        self.nodes += 1;
        let key = board.hash();
        if let Some(&cached) = self.transpositions.get(&key) {
            return Ok(cached);
        }

        if depth == self.max_depth || board.is_terminal() {
            return Ok((evaluate(board, self.player, depth), None));
        }

        let mut remaining = board.successors();
        let mut order: Vec<(usize, Option<&SearchNode>)> = Vec::with_capacity(remaining.len());
        if let Some(prior) = prior {
            for branch in prior.branches() {
                remaining.retain(|&col| col != branch.column);
                order.push((branch.column, Some(&branch.node)));
            }
        }
        order.extend(remaining.into_iter().map(|col| (col, None)));

        let maximizing = depth % 2 == 0;
        let mut best_value = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for (column, hint) in order {
            board
                .apply(column)
                .unwrap_or_else(|err| panic!("search tried an illegal move: {err}"));
            let mut child = SearchNode::new();
            let (value, _) = self.minimax(board, &mut child, hint, alpha, beta, depth + 1)?;
            child.set_value(value);
            node.insert(column, child);
            retract(board);

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(column);
                    if value >= beta {
                        return Ok((value, best_move));
                    }
                    alpha = alpha.max(value);
                }
            } else if value < best_value {
                best_value = value;
                best_move = Some(column);
                if value <= alpha {
                    return Ok((value, best_move));
                }
                beta = beta.min(value);
            }
        }

        self.transpositions.insert(key, (best_value, best_move));
        Ok((best_value, best_move))
    }
}

fn retract(board: &mut Board) {
    if let Err(err) = board.undo() {
        panic!("search path out of sync with board: {err}");
    }
}
