//! Inbound API handlers.
//!
//! One parameterized prediction handler covers every configured model; the
//! upstream and its retry policy are config rows, not per-route code.

use std::time::Instant;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::{call_with_retry, UpstreamRequest};

/// Liveness banner, kept for parity with deployments that probe `/`.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "AgriVision gateway is running" }))
}

/// Health endpoint. External schedulers hit this to keep the gateway warm.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Relay one uploaded image to the model named in the path.
pub async fn predict(
    State(state): State<AppState>,
    Path(model): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let start = Instant::now();

    let Some(upstream) = state.upstreams.get(&model) else {
        metrics::record_request(&model, StatusCode::NOT_FOUND.as_u16(), start);
        return ApiError::unknown_model(&model).into_response();
    };

    tracing::info!(model = %model, "Prediction request received");

    let file = match read_file_field(&mut multipart).await {
        Ok(file) => file,
        Err(err) => {
            metrics::record_request(&model, err.status.as_u16(), start);
            return err.into_response();
        }
    };

    let request = match UpstreamRequest::new(
        upstream.url.clone(),
        file.bytes,
        file.filename,
        file.content_type,
    ) {
        Ok(request) => request,
        Err(err) => {
            let api = ApiError::from_relay(&model, &err);
            metrics::record_request(&model, api.status.as_u16(), start);
            return api.into_response();
        }
    };

    match call_with_retry(
        &state.client,
        &request,
        &upstream.policy,
        upstream.observer.as_ref(),
    )
    .await
    {
        Ok(body) => {
            tracing::info!(model = %model, "Prediction successful");
            metrics::record_request(&model, StatusCode::OK.as_u16(), start);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            tracing::error!(model = %model, error = %err, "Prediction failed");
            let api = ApiError::from_relay(&model, &err);
            metrics::record_request(&model, api.status.as_u16(), start);
            api.into_response()
        }
    }
}

struct FileField {
    bytes: Bytes,
    filename: String,
    content_type: String,
}

/// Pull the `file` field out of the multipart stream.
///
/// Other fields are skipped rather than rejected; the original clients
/// send exactly one field, but that is their contract, not ours.
async fn read_file_field(multipart: &mut Multipart) -> Result<FileField, ApiError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|err| ApiError::invalid_input(err.to_string()))?;

        let Some(field) = field else {
            return Err(ApiError::invalid_input("multipart field \"file\" is missing"));
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::invalid_input(err.to_string()))?;

        return Ok(FileField {
            bytes,
            filename,
            content_type,
        });
    }
}
