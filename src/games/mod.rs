//! Game implementations.
//!
//! - `board`: a single N×N tic-tac-toe grid
//! - `meta`: an N×N grid of boards won by a line of board wins

mod board;
pub mod lines;
mod meta;

pub use board::Board;
pub use meta::MetaGame;
