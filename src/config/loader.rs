//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_ENV: &str = "GATEWAY_CONFIG";

/// Overrides the listener port, matching the original deployment contract.
pub const PORT_ENV: &str = "PORT";

/// Appends one extra allowed CORS origin (the deployed frontend).
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", render_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn render_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve configuration the way the deployment expects: a TOML file named
/// by `GATEWAY_CONFIG` when present, built-in defaults otherwise, with
/// environment overrides applied either way.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config(Path::new(&path));
    }

    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Fold environment state into the configuration.
///
/// - `PORT` rewrites the listener port, keeping the configured host.
/// - `FRONTEND_URL` appends one allowed CORS origin.
/// - Each upstream with a `url_env` takes that variable's value over its
///   configured URL.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(port) = std::env::var(PORT_ENV) {
        if port.parse::<u16>().is_ok() {
            let host = config
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            config.listener.bind_address = format!("{host}:{port}");
        } else {
            tracing::warn!(port = %port, "Ignoring unparseable PORT override");
        }
    }

    if let Ok(frontend) = std::env::var(FRONTEND_URL_ENV) {
        if !frontend.is_empty() && !config.cors.allowed_origins.contains(&frontend) {
            config.cors.allowed_origins.push(frontend);
        }
    }

    for upstream in &mut config.upstreams {
        if let Some(var) = &upstream.url_env {
            if let Ok(url) = std::env::var(var) {
                if !url.is_empty() {
                    upstream.url = url;
                }
            }
        }
    }
}
