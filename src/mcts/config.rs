//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// How a rollout reward is credited to the nodes on the visited path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backpropagation {
    /// Every ancestor receives the same, un-negated reward.
    ///
    /// The reward is the final position's evaluation for the player to move
    /// there. This matches the behavior the bot has always shipped with.
    #[default]
    Uniform,

    /// Each node is credited from the perspective of the player who moved
    /// into it, negating the reward on alternate plies.
    Alternating,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCT exploration constant (default: 1.0).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Number of parallel search workers.
    pub workers: usize,

    /// Random seed for the worker RNG streams.
    pub seed: u64,

    /// Reward crediting scheme.
    pub backpropagation: Backpropagation,

    /// Maximum nodes to allocate in the tree (0 = unlimited).
    /// Workers stop early once the arena reaches this size.
    pub max_nodes: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.0,
            workers: 4,
            seed: 42,
            backpropagation: Backpropagation::Uniform,
            max_nodes: 0,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom worker count (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom backpropagation scheme.
    pub fn with_backpropagation(mut self, backpropagation: Backpropagation) -> Self {
        self.backpropagation = backpropagation;
        self
    }

    /// Create a new config with a node limit.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
