//! Attempt-level event emission.
//!
//! The relay core reports progress through an injected observer instead of
//! logging directly, so the loop stays observable in tests without
//! capturing process-wide output.

use std::time::Duration;

/// Receives structured, leveled events from the retry loop.
pub trait CallObserver: Send + Sync {
    /// An attempt is about to be issued.
    fn attempt_started(&self, url: &str, attempt: u32, max_attempts: u32);

    /// An attempt failed with a transient or fatal reason.
    fn attempt_failed(&self, url: &str, attempt: u32, reason: &str);

    /// A backoff sleep was scheduled before the next attempt.
    fn backoff_scheduled(&self, url: &str, attempt: u32, delay: Duration);

    /// The call resolved successfully after `attempts` attempts.
    fn call_succeeded(&self, url: &str, attempts: u32);

    /// The call failed terminally after `attempts` attempts.
    fn call_failed(&self, url: &str, attempts: u32, reason: &str);
}

/// Production observer: forwards attempt events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn attempt_started(&self, url: &str, attempt: u32, max_attempts: u32) {
        tracing::debug!(url = %url, attempt, max_attempts, "Issuing upstream attempt");
    }

    fn attempt_failed(&self, url: &str, attempt: u32, reason: &str) {
        tracing::warn!(url = %url, attempt, reason = %reason, "Upstream attempt failed");
    }

    fn backoff_scheduled(&self, url: &str, attempt: u32, delay: Duration) {
        tracing::info!(url = %url, attempt, delay = ?delay, "Backing off before retry");
    }

    fn call_succeeded(&self, url: &str, attempts: u32) {
        tracing::info!(url = %url, attempts, "Upstream call succeeded");
    }

    fn call_failed(&self, url: &str, attempts: u32, reason: &str) {
        tracing::error!(url = %url, attempts, reason = %reason, "Upstream call failed");
    }
}
