//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

use crate::resilience::RetryPolicy;

/// Root configuration for the inference gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Hosted model endpoints reachable through `/api/{model}/predict`.
    #[serde(default = "default_upstreams")]
    pub upstreams: Vec<UpstreamConfig>,

    /// Retry policy applied to upstreams that carry no override.
    pub retries: RetryPolicy,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Upload size limits.
    pub limits: LimitsConfig,

    /// Cross-origin policy. One explicit allow-list; there is no
    /// allow-all mode.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstreams: default_upstreams(),
            retries: RetryPolicy::default(),
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// One hosted inference endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Model name, also the `{model}` path segment (e.g. "disease").
    pub name: String,

    /// Endpoint URL the upload is relayed to.
    pub url: String,

    /// Environment variable that overrides `url` when set.
    #[serde(default)]
    pub url_env: Option<String>,

    /// Per-upstream retry policy; falls back to the global one.
    #[serde(default)]
    pub retry: Option<RetryPolicy>,
}

fn default_upstreams() -> Vec<UpstreamConfig> {
    vec![
        UpstreamConfig {
            name: "disease".to_string(),
            url: "https://Happy-1234-dis-32-happy.hf.space/predict".to_string(),
            url_env: Some("HF_DISEASE_URL".to_string()),
            retry: None,
        },
        UpstreamConfig {
            name: "pest".to_string(),
            url: "https://Happy-1234-pest-2-happy.hf.space/predict-pest".to_string(),
            url_env: Some("HF_PEST_URL".to_string()),
            retry: None,
        },
    ]
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds. Must cover the full retry
    /// sequence: max_attempts deadlines plus the backoff in between.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 180 }
    }
}

/// Upload size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Cross-origin policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Exact matches only.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "https://kisan-mitra-frontend.vercel.app".to_string(),
            ],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
