//! # Fibonacci Backoff
//!
//! Provides a Fibonacci-based backoff for watchers whose fetches keep failing.
//! It grows more slowly than exponential backoff, so a flapping API server is
//! retried reasonably soon while a dead one is not hammered at the poll cadence.
//!
//! Sequence for `min = 1s, max = 10s`: 1s, 1s, 2s, 3s, 5s, 8s, 10s (max).

use std::time::Duration;

/// Fibonacci backoff calculator
///
/// Each backoff is the sum of the previous two, capped at `max`.
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    /// Minimum backoff (for reset)
    min: Duration,
    /// Previous backoff value
    prev: Duration,
    /// Current backoff value
    current: Duration,
    /// Maximum backoff value
    max: Duration,
}

impl FibonacciBackoff {
    /// Create a new Fibonacci backoff with the given minimum and maximum.
    ///
    /// The first two values are both `min`.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            prev: Duration::ZERO,
            current: min,
            max,
        }
    }

    /// Get the next backoff duration and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let result = self.current;

        let next = self.prev.saturating_add(self.current);
        self.prev = self.current;
        self.current = std::cmp::min(next, self.max);

        result
    }

    /// Reset the backoff to the initial state
    pub fn reset(&mut self) {
        self.prev = Duration::ZERO;
        self.current = self.min;
    }
}

/// What a watcher does after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The next scheduled tick is the retry
    #[default]
    NextTick,

    /// Ticks are skipped until a Fibonacci backoff since the last failure has elapsed
    Backoff { min: Duration, max: Duration },
}

impl FailurePolicy {
    pub(crate) fn backoff(self) -> Option<FibonacciBackoff> {
        match self {
            Self::NextTick => None,
            Self::Backoff { min, max } => Some(FibonacciBackoff::new(min, max)),
        }
    }
}
