//! # ultimate-mcts
//!
//! A time-bounded, parallel Monte Carlo Tree Search engine for two-player
//! perfect-information games, played on recursive ("meta-board")
//! tic-tac-toe.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic Search**: The engine only sees the `GameState` trait.
//!    Boards and meta-boards are two implementations of it.
//!
//! 2. **Deadline First**: Every search runs against a wall-clock deadline
//!    that is checked inside rollouts, not just between iterations.
//!
//! 3. **Configuration Over Convention**: Search parameters and turn budgets
//!    come from `Bot.toml`, with built-in defaults for every key.
//!
//! ## Architecture
//!
//! - **Shared Arena Tree**: Workers share one tree of nodes addressed by
//!   `NodeId`; each node guards its own statistics with a reader/writer lock.
//!
//! - **Recursive Wins**: A meta-board is won by a line of sub-board wins,
//!   decided by an exact `evaluate(player) == 1.0` on each sub-board.
//!
//! ## Modules
//!
//! - `core`: Players, moves, errors, RNG
//! - `rules`: `GameState` trait and game results
//! - `games`: Single board and meta-board
//! - `mcts`: Monte Carlo Tree Search
//! - `config`: `Bot.toml` loading
//! - `driver`: Judge protocol and turn loop

pub mod core;
pub mod rules;
pub mod games;
pub mod mcts;
pub mod config;
pub mod driver;

// Re-export commonly used types
pub use crate::core::{GameError, GameRng, Move, Player};

pub use crate::rules::{GameResult, GameState};

pub use crate::games::{Board, MetaGame};

pub use crate::mcts::{
    Backpropagation, MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId,
    SearchError, SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy,
    MeanReward, PrioritySimulation, RandomSimulation, UCT,
};

pub use crate::config::{BotConfig, ConfigError, DriverConfig};

pub use crate::driver::{DriverError, TurnDriver, TurnInput};
