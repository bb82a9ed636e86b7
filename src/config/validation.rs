//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check upstream integrity (unique names, parseable URLs)
//! - Validate value ranges (attempt counts, deadlines, delay bounds)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: `GatewayConfig → Result<(), Vec<ValidationError>>`
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::resilience::RetryPolicy;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener bind_address is empty")]
    EmptyBindAddress,

    #[error("no upstreams configured")]
    NoUpstreams,

    #[error("upstream name is empty")]
    EmptyUpstreamName,

    #[error("duplicate upstream name: {0}")]
    DuplicateUpstream(String),

    #[error("upstream {name}: invalid url {url:?}: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("{scope}: max_attempts must be at least 1")]
    ZeroAttempts { scope: String },

    #[error("{scope}: per_attempt_timeout_ms must be greater than 0")]
    ZeroAttemptTimeout { scope: String },

    #[error("{scope}: base_delay_ms exceeds max_delay_ms")]
    InvertedDelayBounds { scope: String },

    #[error("cors allowed origin is empty")]
    EmptyCorsOrigin,
}

/// Validate the full configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    if config.upstreams.is_empty() {
        errors.push(ValidationError::NoUpstreams);
    }

    let mut seen = Vec::new();
    for upstream in &config.upstreams {
        if upstream.name.trim().is_empty() {
            errors.push(ValidationError::EmptyUpstreamName);
        } else if seen.contains(&upstream.name) {
            errors.push(ValidationError::DuplicateUpstream(upstream.name.clone()));
        } else {
            seen.push(upstream.name.clone());
        }

        if let Err(err) = Url::parse(&upstream.url) {
            errors.push(ValidationError::InvalidUrl {
                name: upstream.name.clone(),
                url: upstream.url.clone(),
                reason: err.to_string(),
            });
        }

        if let Some(retry) = &upstream.retry {
            validate_policy(retry, &format!("upstream {}", upstream.name), &mut errors);
        }
    }

    validate_policy(&config.retries, "retries", &mut errors);

    for origin in &config.cors.allowed_origins {
        if origin.trim().is_empty() {
            errors.push(ValidationError::EmptyCorsOrigin);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_policy(policy: &RetryPolicy, scope: &str, errors: &mut Vec<ValidationError>) {
    if policy.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts {
            scope: scope.to_string(),
        });
    }
    if policy.per_attempt_timeout_ms == 0 {
        errors.push(ValidationError::ZeroAttemptTimeout {
            scope: scope.to_string(),
        });
    }
    if policy.base_delay_ms > policy.max_delay_ms {
        errors.push(ValidationError::InvertedDelayBounds {
            scope: scope.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::UpstreamConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_violation_in_one_pass() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = " ".to_string();
        config.upstreams = vec![
            UpstreamConfig {
                name: "pest".to_string(),
                url: "not a url".to_string(),
                url_env: None,
                retry: None,
            },
            UpstreamConfig {
                name: "pest".to_string(),
                url: "https://example.org/predict".to_string(),
                url_env: None,
                retry: None,
            },
        ];
        config.retries.max_attempts = 0;
        config.retries.base_delay_ms = 10_000;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyBindAddress));
        assert!(errors.contains(&ValidationError::DuplicateUpstream("pest".to_string())));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidUrl { name, .. } if name == "pest")));
        assert!(errors.contains(&ValidationError::ZeroAttempts {
            scope: "retries".to_string()
        }));
        assert!(errors.contains(&ValidationError::InvertedDelayBounds {
            scope: "retries".to_string()
        }));
    }

    #[test]
    fn per_upstream_policy_is_validated_under_its_own_scope() {
        let mut config = GatewayConfig::default();
        config.upstreams[0].retry = Some(RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ZeroAttempts {
                scope: "upstream disease".to_string()
            }]
        );
    }

    #[test]
    fn empty_upstream_set_is_rejected() {
        let mut config = GatewayConfig::default();
        config.upstreams.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoUpstreams]);
    }
}
