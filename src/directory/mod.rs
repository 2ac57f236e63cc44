//! Directory service: identity lookup and account lockdown.
//!
//! - [`DirectoryService`] - The operations the offboarding workflow needs
//! - [`GraphDirectory`] - Microsoft Graph implementation
//! - [`MockDirectory`] - In-memory implementation that records calls

pub mod graph;
pub mod mock;

pub use graph::GraphDirectory;
pub use mock::{DirectoryOp, MockDirectory};

use secrecy::SecretString;

use crate::service::{ServiceError, ServiceResult};

/// Failure reported by a directory service.
pub type DirectoryError = ServiceError;

/// A directory user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque object id
    pub id: String,
    pub display_name: String,
    pub principal_name: String,
    pub sign_in_enabled: bool,
}

impl Identity {
    /// An enabled identity whose display name is its principal name.
    pub fn new(id: impl Into<String>, principal_name: impl Into<String>) -> Self {
        let principal_name = principal_name.into();
        Self {
            id: id.into(),
            display_name: principal_name.clone(),
            principal_name,
            sign_in_enabled: true,
        }
    }
}

/// A replacement credential to apply to an identity.
///
/// `Debug` output redacts the credential.
#[derive(Debug)]
pub struct CredentialReset {
    pub credential: SecretString,
    pub force_change_on_next_sign_in: bool,
}

impl CredentialReset {
    /// A reset that forces a change at next sign-in.
    pub fn forced(credential: SecretString) -> Self {
        Self {
            credential,
            force_change_on_next_sign_in: true,
        }
    }
}

/// Directory operations used by the offboarding workflow.
pub trait DirectoryService {
    /// Look up a user by principal name.
    fn resolve_identity(&self, principal: &str) -> ServiceResult<Identity>;

    /// Enable or block sign-in for a user.
    fn set_sign_in_enabled(&self, id: &str, enabled: bool) -> ServiceResult<()>;

    /// Replace the user's credential.
    fn reset_credential(&self, id: &str, reset: &CredentialReset) -> ServiceResult<()>;

    /// Invalidate the user's refresh tokens and session cookies.
    ///
    /// Returns once the request is accepted; propagation is not awaited.
    fn revoke_sessions(&self, id: &str) -> ServiceResult<()>;
}
