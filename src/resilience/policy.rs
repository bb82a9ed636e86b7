//! Retry policy values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for one logical upstream call.
///
/// Constructed once per route (or taken from the global config default) and
/// never mutated while a call sequence is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first try included.
    pub max_attempts: u32,

    /// Hard deadline for each individual attempt in milliseconds.
    pub per_attempt_timeout_ms: u64,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Cap on the backoff delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            per_attempt_timeout_ms: 50_000,
            base_delay_ms: 1_000,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryPolicy {
    /// Per-attempt deadline as a `Duration`.
    pub fn per_attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.per_attempt_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.per_attempt_timeout(), Duration::from_secs(50));
        assert_eq!(policy.base_delay_ms, 1_000);
        assert_eq!(policy.max_delay_ms, 5_000);
    }
}
