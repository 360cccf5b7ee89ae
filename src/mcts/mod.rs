//! Monte Carlo Tree Search for turn-based two-player games.
//!
//! ## Overview
//!
//! A time-bounded, parallel UCT search over any [`GameState`]:
//!
//! - **Shared tree**: one arena of nodes, each guarding its own statistics
//! - **Worker pool**: a fixed number of rayon threads search until a deadline
//! - **Cancellable rollouts**: the deadline is checked at every rollout step
//! - **Configurable policies**: selection (UCT) and simulation (priority, random)
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use ultimate_mcts::games::MetaGame;
//! use ultimate_mcts::mcts::{MCTSConfig, MCTSSearch};
//! use ultimate_mcts::rules::GameState;
//!
//! let game = MetaGame::new(3);
//! let mut search = MCTSSearch::new(MCTSConfig::default()).unwrap();
//!
//! if let Some(mv) = search.search_for(&game, Duration::from_millis(20)) {
//!     assert!(game.legal_actions().contains(&mv));
//! }
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use ultimate_mcts::mcts::{MCTSSearch, MCTSConfig, RandomSimulation};
//!
//! let search = MCTSSearch::new(config)?.with_simulation(RandomSimulation);
//! ```
//!
//! [`GameState`]: crate::rules::GameState

pub mod cancel;
pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use cancel::Cancellation;
pub use config::{Backpropagation, MCTSConfig};
pub use node::{MCTSNode, NodeId, StatsSnapshot};
pub use policy::{
    MeanReward, PrioritySimulation, RandomSimulation, Rollout, SelectionPolicy, SimulationPolicy,
    UCT,
};
pub use search::{MCTSSearch, SearchError};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
