//! Core types: players, moves, errors, RNG.
//!
//! These are the game-agnostic building blocks shared by the boards, the
//! search engine and the turn driver.

pub mod player;
pub mod action;
pub mod error;
pub mod rng;

pub use player::Player;
pub use action::Move;
pub use error::GameError;
pub use rng::GameRng;
