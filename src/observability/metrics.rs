//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound predictions by model, status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency by model
//! - `gateway_upstream_attempts_total` (counter): relay attempts by model, outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to bind is logged and swallowed — the gateway serves traffic
/// with or without a scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "Failed to install metrics exporter"),
    }
}

/// Record one inbound prediction request.
pub fn record_request(model: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "model" => model.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "model" => model.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream attempt event.
pub fn record_attempt(model: &str, outcome: &'static str) {
    metrics::counter!(
        "gateway_upstream_attempts_total",
        "model" => model.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
}
