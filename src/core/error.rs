//! Errors raised when a move cannot be applied.
//!
//! Every variant is returned before the state is touched: a rejected move
//! leaves the board exactly as it was.

use super::{Move, Player};

/// A move was rejected by a board or meta-board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The cell lies outside the grid.
    #[error("move {mv:?} is outside a {size}x{size} board")]
    OutOfBounds { mv: Move, size: usize },

    /// The cell is already owned.
    #[error("cell {mv:?} is already owned by {owner}")]
    CellOccupied { mv: Move, owner: Player },

    /// `Empty` cannot make a move.
    #[error("{0} cannot make a move")]
    InvalidMover(Player),

    /// A global move maps to a sub-board outside the meta-board.
    #[error("move {mv:?} maps to sub-board {sub:?} outside the meta-board")]
    SubBoardOutOfRange { mv: Move, sub: Move },

    /// The targeted sub-board is already won or full.
    #[error("sub-board {sub:?} is already finished")]
    SubBoardFinished { sub: Move },

    /// The local cell is not a legal action of its sub-board.
    #[error("local move {local:?} is not legal in sub-board {sub:?}")]
    IllegalAction { sub: Move, local: Move },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::CellOccupied {
            mv: Move::new(0, 0),
            owner: Player::First,
        };
        assert!(err.to_string().contains("already owned by First"));

        let err = GameError::SubBoardFinished { sub: Move::new(1, 2) };
        assert!(err.to_string().contains("already finished"));
    }
}
