//! Cell ownership and turn order.
//!
//! ## Player
//!
//! Two-player encoding with an explicit `Empty` marker for free cells.
//! The numeric values follow a {1, 2} scheme so the opponent of an occupied
//! player is always `3 - p`.

use serde::{Deserialize, Serialize};

/// Owner of a cell, or the side to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    /// Free cell. Never the side to move.
    #[default]
    Empty = 0,
    /// The searching agent.
    First = 1,
    /// The opponent.
    Second = 2,
}

impl Player {
    /// Both players that can own a cell.
    pub const BOTH: [Player; 2] = [Player::First, Player::Second];

    /// Get the raw encoding (0, 1 or 2).
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Decode a raw value. Anything outside {0, 1, 2} is `None`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Player::Empty),
            1 => Some(Player::First),
            2 => Some(Player::Second),
            _ => None,
        }
    }

    /// The other side. `Empty` has no opponent and maps to itself.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Empty => Player::Empty,
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Check if this is a real player rather than the empty marker.
    #[inline]
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !matches!(self, Player::Empty)
    }

    /// Single-character symbol used when rendering boards.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::Empty => '.',
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Empty => write!(f, "Empty"),
            Player::First => write!(f, "First"),
            Player::Second => write!(f, "Second"),
        }
    }
}
