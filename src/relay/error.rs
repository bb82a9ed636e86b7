//! Terminal error taxonomy for upstream relay calls.

use thiserror::Error;

/// How a relayed call ultimately failed.
///
/// Transport-level variants (`Timeout`, `Connection`, `Upstream`) are only
/// produced after the retry policy is exhausted and carry the attempt count
/// plus the last underlying reason. `InvalidInput` and `MalformedResponse`
/// are never retried.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The inbound upload was unusable; nothing was sent upstream.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The final attempt exceeded its per-attempt deadline.
    #[error("upstream timed out after {attempts} attempt(s): {last}")]
    Timeout { attempts: u32, last: String },

    /// The final attempt could not reach the upstream at all.
    #[error("failed to reach upstream after {attempts} attempt(s): {last}")]
    Connection { attempts: u32, last: String },

    /// The final attempt got a non-success status back.
    #[error("upstream failed after {attempts} attempt(s): {last}")]
    Upstream {
        attempts: u32,
        status: u16,
        last: String,
    },

    /// 2xx response with an unparseable body. Retrying cannot fix a
    /// persistent contract violation, so this is terminal on first sight.
    #[error("upstream returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl RelayError {
    /// Stable machine-readable code surfaced to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::InvalidInput(_) => "INVALID_INPUT",
            RelayError::Timeout { .. } => "TIMEOUT",
            RelayError::Connection { .. } => "CONNECTION_ERROR",
            RelayError::Upstream { .. } => "UPSTREAM_ERROR",
            RelayError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(RelayError::InvalidInput("x".into()).code(), "INVALID_INPUT");
        assert_eq!(
            RelayError::Timeout {
                attempts: 3,
                last: "no response within 50000ms".into()
            }
            .code(),
            "TIMEOUT"
        );
        assert_eq!(
            RelayError::Connection {
                attempts: 3,
                last: "connection refused".into()
            }
            .code(),
            "CONNECTION_ERROR"
        );
        assert_eq!(
            RelayError::Upstream {
                attempts: 3,
                status: 503,
                last: "HTTP 503: Service Unavailable".into()
            }
            .code(),
            "UPSTREAM_ERROR"
        );
    }

    #[test]
    fn terminal_messages_aggregate_attempt_count_and_last_reason() {
        let err = RelayError::Upstream {
            attempts: 3,
            status: 503,
            last: "HTTP 503: Service Unavailable".into(),
        };
        let message = err.to_string();
        assert!(message.contains("3 attempt"));
        assert!(message.contains("HTTP 503"));
    }
}
