//! Shared plumbing for the remote directory and mailbox services.
//!
//! - [`ServiceError`] / [`ErrorKind`] - Classified remote failures
//! - [`ApiClient`] - Bearer-authenticated JSON client used by both services
//! - [`CallLog`] - Ordered record of calls made against the in-memory mocks

pub mod calls;
pub mod http;

pub use calls::{Call, CallLog};
pub use http::ApiClient;

use std::fmt;

use reqwest::StatusCode;

/// OData error codes that mean the addressed object does not exist.
const NOT_FOUND_CODES: &[&str] = &[
    "Request_ResourceNotFound",
    "ResourceNotFound",
    "ErrorItemNotFound",
    "ManagementObjectNotFoundException",
];

/// Message fragments that suggest a missing object.
///
/// Only consulted when neither the HTTP status nor the error code decides.
/// Services are free to reword these messages, so a match here is a guess.
const NOT_FOUND_PHRASES: &[&str] = &["does not exist", "couldn't be found", "not found"];

/// Category of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed user or mailbox does not exist.
    NotFound,
    /// Missing, expired or rejected credentials.
    Unauthorized,
    /// Authenticated but lacking the permission for this call.
    Forbidden,
    /// The service asked us to slow down.
    Throttled,
    /// Any other error reported by the service.
    Service,
    /// The request never got a response (DNS, TLS, timeout, bad body).
    Transport,
}

impl ErrorKind {
    /// Classify a failed response.
    pub fn classify(status: StatusCode, code: Option<&str>, message: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => return Self::NotFound,
            StatusCode::UNAUTHORIZED => return Self::Unauthorized,
            StatusCode::FORBIDDEN => return Self::Forbidden,
            StatusCode::TOO_MANY_REQUESTS => return Self::Throttled,
            _ => {}
        }

        if code.is_some_and(|c| NOT_FOUND_CODES.contains(&c)) {
            return Self::NotFound;
        }

        let lowered = message.to_lowercase();
        if NOT_FOUND_PHRASES.iter().any(|p| lowered.contains(p)) {
            tracing::debug!(%status, ?code, "classified as not found from message text");
            return Self::NotFound;
        }

        Self::Service
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Throttled => "throttled",
            Self::Service => "service error",
            Self::Transport => "transport error",
        };
        f.write_str(label)
    }
}

/// A failed call against a remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// Failure category used for step classification.
    pub kind: ErrorKind,
    /// Service error code, when the response carried one.
    pub code: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl ServiceError {
    /// Create an error without a service code.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Attach the service's error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether this error means the addressed object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(ErrorKind::Transport, e.to_string())
    }
}

/// Result type for remote service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
