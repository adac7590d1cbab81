//! Search deadline.

use std::time::{Duration, Instant};

/// Wall-clock budget for one turn.
///
/// The search polls [`expired`](SearchControl::expired) at the top of every
/// sibling loop and after each completed depth. Expiry never interrupts a
/// call; the walk in progress unwinds normally and is thrown away.
#[derive(Debug, Clone)]
pub struct SearchControl {
    start: Instant,
    deadline: Option<Instant>,
}

impl SearchControl {
    /// Budget of `budget` starting now.
    pub fn new(budget: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            deadline: start.checked_add(budget),
        }
    }

    /// No time limit; only the depth limit stops the search.
    pub fn unbounded() -> Self {
        Self {
            start: Instant::now(),
            deadline: None,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
