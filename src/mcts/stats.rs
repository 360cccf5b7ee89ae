//! MCTS search statistics for diagnostics and tuning.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations that completed and were backpropagated.
    pub iterations: u32,

    /// Nodes expanded (child lists materialized).
    pub nodes_expanded: u32,

    /// Rollouts that reached a terminal position.
    pub simulations: u32,

    /// Rollouts abandoned at the deadline.
    pub cancelled_rollouts: u32,

    /// Rollout plies played in total.
    pub rollout_steps: u64,

    /// Maximum tree depth reached.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate average rollout length.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_steps as f64 / self.simulations as f64
        }
    }
}

/// Lock-free counters the workers bump while searching.
#[derive(Debug, Default)]
pub(crate) struct SearchCounters {
    pub iterations: AtomicU32,
    pub nodes_expanded: AtomicU32,
    pub simulations: AtomicU32,
    pub cancelled_rollouts: AtomicU32,
    pub rollout_steps: AtomicU64,
}

impl SearchCounters {
    /// Copy the counters into a `SearchStats`.
    pub fn snapshot(&self) -> SearchStats {
        SearchStats {
            iterations: self.iterations.load(Ordering::Relaxed),
            nodes_expanded: self.nodes_expanded.load(Ordering::Relaxed),
            simulations: self.simulations.load(Ordering::Relaxed),
            cancelled_rollouts: self.cancelled_rollouts.load(Ordering::Relaxed),
            rollout_steps: self.rollout_steps.load(Ordering::Relaxed),
            ..SearchStats::default()
        }
    }
}
