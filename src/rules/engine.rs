//! Game state trait for search.
//!
//! Games implement `GameState` to define their rules:
//! - Whose turn it is and which moves are legal
//! - How a move modifies the state
//! - Win/loss conditions and a bounded evaluation

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::{GameError, Player};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Game state trait.
///
/// `Clone` must be a deep copy: mutating a clone never affects the
/// original. The engine clones a state for every expansion and rollout and
/// moves the clones across worker threads, hence `Send + Sync`.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty when no move remains; the search never asks a
///   terminal state for moves
/// - `apply`: Reject illegal moves without mutating
/// - `evaluate`: Exactly `1.0` only for a confirmed win, exactly `-1.0`
///   only for a confirmed loss
pub trait GameState: Clone + Send + Sync {
    /// Move descriptor for this game.
    type Action: Clone + Copy + Debug + PartialEq + Eq + Hash + Send + Sync;

    /// The player to move.
    fn current_player(&self) -> Player;

    /// Every legal move from this position.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Apply a move for `mover`, then hand the turn to the opponent.
    ///
    /// Returns an error and leaves the state unchanged if the move is not
    /// legal.
    fn apply(&mut self, action: &Self::Action, mover: Player) -> Result<(), GameError>;

    /// Whether either side has won or no legal move remains.
    fn is_terminal(&self) -> bool;

    /// Score in `[-1, 1]` from `player`'s perspective.
    fn evaluate(&self, player: Player) -> f64;

    /// Rollout hint: moves a heuristic playout should prefer.
    fn is_priority_action(&self, _action: &Self::Action) -> bool {
        false
    }

    // === Convenience Methods ===

    /// Classify a finished game.
    ///
    /// Returns `None` while the game continues. A win is reported only on an
    /// exact `1.0` evaluation; anything else at a terminal state is a draw.
    fn result(&self) -> Option<GameResult> {
        if !self.is_terminal() {
            return None;
        }

        Player::BOTH
            .into_iter()
            .find(|&p| self.evaluate(p) == 1.0)
            .map(GameResult::Winner)
            .or(Some(GameResult::Draw))
    }

    /// Check whether `action` is currently legal.
    fn is_legal(&self, action: &Self::Action) -> bool {
        self.legal_actions().contains(action)
    }
}
