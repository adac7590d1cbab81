//! Per-move time slicing.

use std::time::Duration;

use crate::config::EngineConfig;

/// Splits the remaining clock evenly over the moves expected to remain.
///
/// The estimate of total moves is fixed at the start of the game. When the
/// game runs long and fewer than `threshold` moves remain in it, the estimate
/// is pushed out by `threshold` so the slice never collapses to the whole
/// clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeManager {
    moves_made: u32,
    estimate: u32,
    threshold: u32,
}

impl TimeManager {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            moves_made: 0,
            estimate: config.moves_estimate,
            threshold: config.moves_threshold,
        }
    }

    /// Time to spend on this move, and count the move as made.
    pub fn slice(&mut self, remaining: Duration) -> Duration {
        if self.estimate.saturating_sub(self.moves_made) <= self.threshold {
            self.estimate += self.threshold;
        }
        let moves_left = self.estimate.saturating_sub(self.moves_made).max(1);
        self.moves_made += 1;
        remaining / moves_left
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TimeManager;
    use crate::config::EngineConfig;

    fn manager(estimate: u32, threshold: u32) -> TimeManager {
        let config = EngineConfig {
            moves_estimate: estimate,
            moves_threshold: threshold,
            ..EngineConfig::default()
        };
        TimeManager::new(&config)
    }

    #[test]
    fn first_slice_divides_by_estimate() {
        let mut tm = manager(40, 10);
        assert_eq!(tm.slice(Duration::from_secs(400)), Duration::from_secs(10));
        assert_eq!(tm.moves_made(), 1);
    }

    #[test]
    fn slice_grows_as_moves_are_made() {
        let mut tm = manager(40, 10);
        let remaining = Duration::from_secs(120);
        let first = tm.slice(remaining);
        let second = tm.slice(remaining);
        assert!(second > first);
        assert_eq!(second, remaining / 39);
    }

    #[test]
    fn estimate_bumped_at_threshold() {
        let mut tm = manager(12, 10);
        // 12 - 0 > 10
        assert_eq!(tm.slice(Duration::from_secs(12)), Duration::from_secs(1));
        // 12 - 1 > 10
        tm.slice(Duration::from_secs(11));
        // 12 - 2 <= 10: estimate becomes 22, 20 moves left.
        assert_eq!(tm.slice(Duration::from_secs(20)), Duration::from_secs(1));
        assert_eq!(tm.estimate(), 22);
    }

    #[test]
    fn zero_threshold_never_divides_by_zero() {
        let mut tm = manager(2, 0);
        for _ in 0..5 {
            assert!(tm.slice(Duration::from_secs(1)) <= Duration::from_secs(1));
        }
    }
}
