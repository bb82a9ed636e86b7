//! Per-attempt deadline enforcement.
//!
//! # Responsibilities
//! - Wrap a single upstream attempt with a hard deadline
//! - Cancel the underlying transport cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facility; the timer is released on both paths
//! - Deadline expiry is distinct from transport errors so the retry loop
//!   can classify it separately

use std::future::Future;
use std::time::Duration;

/// Marker for an attempt that exceeded its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineExceeded(pub Duration);

impl std::fmt::Display for DeadlineExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no response within {}ms", self.0.as_millis())
    }
}

/// Run `fut` under a hard deadline of `budget`.
///
/// Returns the operation's output if it finishes in time. On expiry the
/// future is dropped, which aborts the in-flight request at the transport
/// layer.
pub async fn with_deadline<F>(budget: Duration, fut: F) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::time::timeout(budget, fut)
        .await
        .map_err(|_| DeadlineExceeded(budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_within_budget() {
        let result = with_deadline(Duration::from_millis(500), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn expires_when_the_operation_stalls() {
        let result = with_deadline(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            7
        })
        .await;

        assert_eq!(result, Err(DeadlineExceeded(Duration::from_millis(20))));
    }
}
