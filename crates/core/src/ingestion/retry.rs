//! Retry budget for ingestion cycles.

use std::time::Duration;

use crate::constants::{DEFAULT_RETRY_BASE_MS, DEFAULT_RETRY_MAX_ATTEMPTS};

/// Bounded retry with linearly growing backoff.
///
/// After failed attempt `n` the cycle waits `n * base` before attempt `n + 1`,
/// so the default policy waits 2s then 4s and gives up after the third failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never below 1.
    pub max_attempts: u32,
    pub base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
        }
    }

    /// Wait after failed attempt `attempt` (1-based), or `None` once the budget is spent.
    pub fn backoff_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            None
        } else {
            Some(self.base.saturating_mul(attempt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_after(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.backoff_after(2), Some(Duration::from_secs(4)));
        assert_eq!(policy.backoff_after(3), None);
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::new(6, Duration::from_millis(500));
        let waits: Vec<_> = (1..6).filter_map(|n| policy.backoff_after(n)).collect();
        assert_eq!(
            waits,
            (1..6u64).map(|n| Duration::from_millis(500 * n)).collect::<Vec<_>>()
        );
        assert!(waits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_attempt_never_backs_off() {
        assert_eq!(RetryPolicy::new(0, Duration::from_secs(1)).max_attempts, 1);
        assert_eq!(RetryPolicy::new(1, Duration::from_secs(1)).backoff_after(1), None);
    }
}
