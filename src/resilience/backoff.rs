//! Capped exponential backoff.

use std::time::Duration;

use crate::resilience::RetryPolicy;

/// Delay to wait after `attempt` has failed, before issuing the next one.
///
/// Deterministic: `min(base_delay_ms * 2^(attempt - 1), max_delay_ms)` for
/// `attempt >= 1`. Does not sleep; the caller awaits the returned duration
/// so the wait stays cancellable.
pub fn backoff_delay(attempt: u32, policy: &RetryPolicy) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = policy.base_delay_ms.saturating_mul(exponential_base);

    Duration::from_millis(delay_ms.min(policy.max_delay_ms))
}
