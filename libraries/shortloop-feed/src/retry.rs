//! Centralized retry policy for feed requests
//!
//! All FeedRequest call sites share one schedule instead of scattering
//! ad-hoc backoff logic.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry schedule: bounded attempts with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts before giving up and falling back (default: 3)
    pub max_attempts: u32,

    /// Delay before the first retry (default: 2 s)
    pub base_delay: Duration,

    /// Multiplier applied per attempt (default: 2)
    pub factor: u32,

    /// Upper bound on any single delay (default: 30 s)
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before the given retry attempt (1-based).
    ///
    /// Returns `None` once attempts are exhausted; the caller then falls
    /// back to the default category.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let exponent = attempt.saturating_sub(1).min(16);
        let multiplier = self.factor.saturating_pow(exponent);
        Some(
            self.base_delay
                .saturating_mul(multiplier)
                .min(self.max_delay),
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            factor: 2,
            max_delay: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_secs(4)));
        assert_eq!(policy.delay_for(3), Some(Duration::from_secs(8)));
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(4), None);
        assert_eq!(policy.delay_for(0), None);
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_secs(10),
            factor: 10,
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_for(3), Some(Duration::from_secs(30)));
    }
}
