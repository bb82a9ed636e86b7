//! The resilient upstream call.
//!
//! # Responsibilities
//! - Perform up to `max_attempts` strictly sequential attempts of one
//!   logical inference call
//! - Short-circuit on the first 2xx with a parseable JSON body
//! - Classify the terminal outcome for the HTTP layer
//!
//! # Design Decisions
//! - Non-2xx, network errors and deadline expiries are transient; a 2xx
//!   with an unparseable body is a contract violation and never retried
//! - Both suspension points (the attempt and the backoff sleep) are plain
//!   awaits, so dropping the caller's future cancels the whole sequence

use reqwest::Client;
use serde_json::Value;

use crate::relay::multipart::{build_form, UpstreamRequest};
use crate::relay::observer::CallObserver;
use crate::relay::RelayError;
use crate::resilience::{backoff_delay, with_deadline, RetryPolicy};

/// Outcome of a single attempt, before terminal classification.
#[derive(Debug)]
enum AttemptError {
    /// The attempt exceeded its per-attempt deadline.
    TimedOut(u64),

    /// The request never produced a response (DNS, refused, reset).
    Connect(String),

    /// The upstream answered with a non-success status.
    Status(u16, String),

    /// The upload itself was unusable. Fatal.
    Invalid(String),

    /// 2xx with an unparseable body. Fatal.
    Malformed(String),
}

impl AttemptError {
    fn reason(&self) -> String {
        match self {
            AttemptError::TimedOut(budget_ms) => format!("no response within {budget_ms}ms"),
            AttemptError::Connect(reason) => reason.clone(),
            AttemptError::Status(_, text) => text.clone(),
            AttemptError::Invalid(reason) => reason.clone(),
            AttemptError::Malformed(reason) => reason.clone(),
        }
    }

    /// Fatal failures short-circuit the retry loop.
    fn is_fatal(&self) -> bool {
        matches!(self, AttemptError::Invalid(_) | AttemptError::Malformed(_))
    }
}

/// Perform one logical upstream call under `policy`.
///
/// Attempt *n + 1* never starts before attempt *n* has resolved and its
/// backoff has elapsed. The loop owns no state beyond its local attempt
/// counter, so concurrent inbound requests never interfere.
pub async fn call_with_retry(
    client: &Client,
    request: &UpstreamRequest,
    policy: &RetryPolicy,
    observer: &dyn CallObserver,
) -> Result<Value, RelayError> {
    // Guard again here: callers constructing `UpstreamRequest` directly via
    // struct literal must still never reach the network with no payload.
    if request.payload.is_empty() {
        return Err(RelayError::InvalidInput("image payload is empty".into()));
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        observer.attempt_started(&request.target_url, attempt, policy.max_attempts);

        let err = match issue_attempt(client, request, policy).await {
            Ok(body) => {
                observer.call_succeeded(&request.target_url, attempt);
                return Ok(body);
            }
            Err(err) => err,
        };

        observer.attempt_failed(&request.target_url, attempt, &err.reason());

        if err.is_fatal() || attempt >= policy.max_attempts {
            let terminal = classify_terminal(attempt, err);
            observer.call_failed(&request.target_url, attempt, &terminal.to_string());
            return Err(terminal);
        }

        let delay = backoff_delay(attempt, policy);
        observer.backoff_scheduled(&request.target_url, attempt, delay);
        tokio::time::sleep(delay).await;
    }
}

/// Issue one attempt under the per-attempt deadline.
///
/// The deadline covers the whole attempt — connect, send, and body read —
/// so a model that accepts the upload and then stalls still times out.
async fn issue_attempt(
    client: &Client,
    request: &UpstreamRequest,
    policy: &RetryPolicy,
) -> Result<Value, AttemptError> {
    let form = match build_form(request) {
        Ok(form) => form,
        Err(err) => return Err(AttemptError::Invalid(err.to_string())),
    };

    let send = async {
        let response = client
            .post(&request.target_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AttemptError::Connect(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = status.canonical_reason().unwrap_or("unknown status");
            return Err(AttemptError::Status(
                status.as_u16(),
                format!("HTTP {}: {}", status.as_u16(), text),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| AttemptError::Malformed(err.to_string()))
    };

    match with_deadline(policy.per_attempt_timeout(), send).await {
        Ok(result) => result,
        Err(_) => Err(AttemptError::TimedOut(policy.per_attempt_timeout_ms)),
    }
}

/// Map the last attempt's failure kind onto the caller-facing taxonomy.
fn classify_terminal(attempts: u32, last: AttemptError) -> RelayError {
    let reason = last.reason();
    match last {
        AttemptError::TimedOut(_) => RelayError::Timeout {
            attempts,
            last: reason,
        },
        AttemptError::Connect(_) => RelayError::Connection {
            attempts,
            last: reason,
        },
        AttemptError::Status(status, _) => RelayError::Upstream {
            attempts,
            status,
            last: reason,
        },
        AttemptError::Invalid(reason) => RelayError::InvalidInput(reason),
        AttemptError::Malformed(reason) => RelayError::MalformedResponse(reason),
    }
}
