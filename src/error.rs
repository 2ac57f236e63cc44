//! Error types for offboard operations.
//!
//! This module defines [`OffboardError`], the error type for everything that
//! happens outside an individual workflow step, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Remote failures inside a workflow step never surface as `OffboardError`;
//!   the runner records them in the report instead
//! - Use `OffboardError` for setup problems the operator has to fix
//! - Use `anyhow::Error` (via `OffboardError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for offboard operations.
#[derive(Debug, Error)]
pub enum OffboardError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No way to authenticate against a service.
    #[error("No credentials for {service}: {message}")]
    MissingCredentials { service: String, message: String },

    /// A principal name supplied on the command line is not email-shaped.
    #[error("Invalid principal name '{value}': expected an address containing '@'")]
    InvalidPrincipal { value: String },

    /// The input source ran out before a valid value was entered.
    #[error("No valid input received for '{prompt}'")]
    InputExhausted { prompt: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for offboard operations.
pub type Result<T> = std::result::Result<T, OffboardError>;
