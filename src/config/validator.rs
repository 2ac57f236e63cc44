//! Configuration validation rules.
//!
//! - `credential_length` must be at least the generator minimum
//! - `timeout_secs` must be positive
//! - Every endpoint must be an absolute http(s) URL

use url::Url;

use crate::config::schema::OffboardConfig;
use crate::error::{OffboardError, Result};
use crate::secrets::MIN_CREDENTIAL_LENGTH;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &OffboardConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_settings(config));
    errors.extend(validate_endpoints(config));

    if config.client_secret_env.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-secret-env",
            "client_secret_env must name an environment variable".to_string(),
        ));
    }

    errors
}

fn validate_settings(config: &OffboardConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let settings = &config.settings;

    if settings.credential_length < MIN_CREDENTIAL_LENGTH {
        errors.push(ValidationError::new(
            "credential-too-short",
            format!(
                "settings.credential_length is {} but must be at least {}",
                settings.credential_length, MIN_CREDENTIAL_LENGTH
            ),
        ));
    }

    if settings.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "settings.timeout_secs must be greater than 0".to_string(),
        ));
    }

    errors
}

fn validate_endpoints(config: &OffboardConfig) -> Vec<ValidationError> {
    let endpoints = [
        ("graph", &config.endpoints.graph),
        ("exchange", &config.endpoints.exchange),
        ("login", &config.endpoints.login),
    ];

    endpoints
        .iter()
        .filter_map(|(name, value)| {
            let valid = Url::parse(value)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                .unwrap_or(false);
            (!valid).then(|| {
                ValidationError::new(
                    "invalid-endpoint",
                    format!("endpoints.{} '{}' is not an absolute http(s) URL", name, value),
                )
            })
        })
        .collect()
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &OffboardConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(OffboardError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
