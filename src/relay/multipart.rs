//! Single-file multipart relay bodies.
//!
//! The upstream classifiers expect `multipart/form-data` with one `file`
//! field. Only the multipart framing is added around the upload — the image
//! bytes are attached exactly as received, never re-encoded.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::relay::RelayError;

/// One logical upstream call: a single uploaded file bound for one endpoint.
///
/// Immutable once constructed; created per inbound prediction request and
/// discarded after the call resolves.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub target_url: String,
    pub payload: Bytes,
    pub filename: String,
    pub mime_type: String,
}

impl UpstreamRequest {
    /// Build the request, rejecting empty payloads before anything touches
    /// the network.
    pub fn new(
        target_url: impl Into<String>,
        payload: Bytes,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Result<Self, RelayError> {
        if payload.is_empty() {
            return Err(RelayError::InvalidInput("image payload is empty".into()));
        }

        Ok(Self {
            target_url: target_url.into(),
            payload,
            filename: filename.into(),
            mime_type: mime_type.into(),
        })
    }
}

/// Re-encode the payload as a single-field multipart form.
///
/// Forms are single-use in reqwest, so one is built per attempt; the
/// payload itself is shared, only the framing is rebuilt.
pub fn build_form(request: &UpstreamRequest) -> Result<Form, RelayError> {
    let part = Part::bytes(request.payload.to_vec())
        .file_name(request.filename.clone())
        .mime_str(&request.mime_type)
        .map_err(|err| {
            RelayError::InvalidInput(format!(
                "invalid content type {:?}: {}",
                request.mime_type, err
            ))
        })?;

    Ok(Form::new().part("file", part))
}
