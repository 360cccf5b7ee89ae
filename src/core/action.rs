//! Move representation: a row/column pair.
//!
//! The same type addresses a cell of a single board (local coordinates) and
//! a cell of the whole meta-board (global coordinates). Which one a `Move`
//! holds is decided by the state it is applied to.

use serde::{Deserialize, Serialize};

/// A move targeting one cell.
///
/// ## Example
///
/// ```
/// use ultimate_mcts::core::Move;
///
/// let mv = Move::new(4, 7);
/// assert_eq!(mv.row, 4);
/// assert_eq!(mv.col, 7);
/// assert_eq!(mv.to_string(), "4 7");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Row index (0-based).
    pub row: usize,

    /// Column index (0-based).
    pub col: usize,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Split a global move into (sub-board, local cell) for boards of `size`.
    #[inline]
    #[must_use]
    pub const fn split(self, size: usize) -> (Move, Move) {
        (
            Move::new(self.row / size, self.col / size),
            Move::new(self.row % size, self.col % size),
        )
    }

    /// Inverse of [`Move::split`]: `global = sub * size + local` per axis.
    #[inline]
    #[must_use]
    pub const fn join(sub: Move, local: Move, size: usize) -> Move {
        Move::new(sub.row * size + local.row, sub.col * size + local.col)
    }
}

/// Formats as the judge protocol expects: `"<row> <col>"`.
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
