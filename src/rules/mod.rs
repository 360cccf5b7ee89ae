//! Game state trait for game implementations.
//!
//! Games implement `GameState` to define:
//! - Legal actions for each position
//! - How actions modify state
//! - Win/loss conditions
//!
//! The search engine calls into `GameState` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, GameState};
