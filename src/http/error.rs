//! Mapping relay failures onto HTTP responses.
//!
//! Every failure path answers with structured JSON — a human-readable
//! `error`, the underlying `details`, a stable `code`, and a `suggestion`
//! for the user. Raw error chains and stack traces never leak.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::relay::RelayError;

/// Structured error body returned on every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub code: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A failure ready to be sent to the inbound caller.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

const COLD_START_HINT: &str =
    "The AI model may be starting up. Please try again in a few seconds.";

impl ApiError {
    /// The upload never made it past input checks.
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: "Image file is required".to_string(),
                details: Some(details.into()),
                code: "INVALID_INPUT",
                suggestion: Some(
                    "Attach a non-empty image under the multipart field \"file\".".to_string(),
                ),
            },
        }
    }

    /// No configured model matches the requested path segment.
    pub fn unknown_model(model: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody {
                error: format!("No model named {model:?} is configured"),
                details: None,
                code: "UNKNOWN_MODEL",
                suggestion: Some("Check the model name in the request path.".to_string()),
            },
        }
    }

    /// Map a terminal relay failure for the named model.
    pub fn from_relay(model: &str, err: &RelayError) -> Self {
        match err {
            RelayError::InvalidInput(reason) => Self::invalid_input(reason.clone()),

            RelayError::Timeout { .. } => Self {
                status: StatusCode::GATEWAY_TIMEOUT,
                body: ErrorBody {
                    error: format!("Failed to predict {model}"),
                    details: Some(err.to_string()),
                    code: "TIMEOUT",
                    suggestion: Some(COLD_START_HINT.to_string()),
                },
            },

            RelayError::Connection { .. } => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: ErrorBody {
                    error: format!("Failed to predict {model}"),
                    details: Some(err.to_string()),
                    code: "CONNECTION_ERROR",
                    suggestion: Some(COLD_START_HINT.to_string()),
                },
            },

            RelayError::Upstream { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    error: format!("Failed to predict {model}"),
                    details: Some(err.to_string()),
                    code: "UPSTREAM_ERROR",
                    suggestion: Some(COLD_START_HINT.to_string()),
                },
            },

            RelayError::MalformedResponse(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    error: format!("Failed to predict {model}"),
                    details: Some(err.to_string()),
                    code: "MALFORMED_RESPONSE",
                    suggestion: Some(
                        "The model answered with an unexpected payload. Report this if it persists."
                            .to_string(),
                    ),
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
