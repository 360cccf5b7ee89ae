//! Deadline-based cancellation shared by all search workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Wall-clock deadline plus an explicit stop flag.
///
/// Checked at the top of every iteration and at every rollout step.
#[derive(Debug)]
pub struct Cancellation {
    deadline: Instant,
    stopped: AtomicBool,
}

impl Cancellation {
    /// Cancel once `deadline` has passed.
    #[must_use]
    pub fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            stopped: AtomicBool::new(false),
        }
    }

    /// Cancel once `budget` has elapsed from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self::new(Instant::now() + budget)
    }

    /// Stop all workers regardless of the deadline.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Check whether work should stop.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Acquire) || Instant::now() >= self.deadline
    }

    /// Time left before the deadline.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
