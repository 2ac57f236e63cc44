//! In-memory directory service for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::service::{Call, CallLog, ServiceError, ServiceResult};

use super::{CredentialReset, DirectoryService, Identity};

/// Operation a [`MockDirectory`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryOp {
    Resolve,
    SetSignInEnabled,
    ResetCredential,
    RevokeSessions,
}

/// Directory service that keeps identities in memory and records every call.
///
/// The credential passed to `reset_credential` is never stored.
///
/// # Example
///
/// ```
/// use offboard::directory::{DirectoryService, Identity, MockDirectory};
/// use offboard::service::CallLog;
///
/// let log = CallLog::new();
/// let directory = MockDirectory::new(log.clone())
///     .with_identity(Identity::new("id-1", "jdoe@contoso.com"));
///
/// let identity = directory.resolve_identity("jdoe@contoso.com").unwrap();
/// directory.set_sign_in_enabled(&identity.id, false).unwrap();
///
/// assert!(!directory.identity("jdoe@contoso.com").unwrap().sign_in_enabled);
/// assert_eq!(log.names(), vec!["resolve", "set-sign-in-enabled"]);
/// ```
pub struct MockDirectory {
    log: CallLog,
    identities: RefCell<HashMap<String, Identity>>,
    failures: HashMap<DirectoryOp, ServiceError>,
}

impl MockDirectory {
    /// Create an empty directory recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            identities: RefCell::new(HashMap::new()),
            failures: HashMap::new(),
        }
    }

    /// Add an identity, keyed by its principal name.
    pub fn with_identity(self, identity: Identity) -> Self {
        self.identities
            .borrow_mut()
            .insert(identity.principal_name.to_lowercase(), identity);
        self
    }

    /// Make every call of `op` fail with `error`.
    pub fn fail(mut self, op: DirectoryOp, error: ServiceError) -> Self {
        self.failures.insert(op, error);
        self
    }

    /// Current state of an identity, by principal name.
    pub fn identity(&self, principal: &str) -> Option<Identity> {
        self.identities
            .borrow()
            .get(&principal.to_lowercase())
            .cloned()
    }

    fn check(&self, op: DirectoryOp) -> ServiceResult<()> {
        match self.failures.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn update<F>(&self, id: &str, f: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Identity),
    {
        let mut identities = self.identities.borrow_mut();
        match identities.values_mut().find(|i| i.id == id) {
            Some(identity) => {
                f(identity);
                Ok(())
            }
            None => Err(ServiceError::not_found(format!(
                "Resource '{}' does not exist",
                id
            ))),
        }
    }
}

impl DirectoryService for MockDirectory {
    fn resolve_identity(&self, principal: &str) -> ServiceResult<Identity> {
        self.log.record(Call::ResolveIdentity(principal.to_string()));
        self.check(DirectoryOp::Resolve)?;
        self.identity(principal).ok_or_else(|| {
            ServiceError::not_found(format!("Resource '{}' does not exist", principal))
        })
    }

    fn set_sign_in_enabled(&self, id: &str, enabled: bool) -> ServiceResult<()> {
        self.log.record(Call::SetSignInEnabled {
            id: id.to_string(),
            enabled,
        });
        self.check(DirectoryOp::SetSignInEnabled)?;
        self.update(id, |identity| identity.sign_in_enabled = enabled)
    }

    fn reset_credential(&self, id: &str, reset: &CredentialReset) -> ServiceResult<()> {
        self.log.record(Call::ResetCredential {
            id: id.to_string(),
            force_change: reset.force_change_on_next_sign_in,
        });
        self.check(DirectoryOp::ResetCredential)?;
        self.update(id, |_| {})
    }

    fn revoke_sessions(&self, id: &str) -> ServiceResult<()> {
        self.log.record(Call::RevokeSessions(id.to_string()));
        self.check(DirectoryOp::RevokeSessions)?;
        self.update(id, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ErrorKind;
    use secrecy::SecretString;

    fn directory(log: &CallLog) -> MockDirectory {
        MockDirectory::new(log.clone()).with_identity(Identity::new("id-1", "jdoe@contoso.com"))
    }

    #[test]
    fn unknown_principal_is_not_found() {
        let log = CallLog::new();
        let err = directory(&log)
            .resolve_identity("ghost@contoso.com")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(log.names(), vec!["resolve"]);
    }

    #[test]
    fn reset_records_force_flag_only() {
        let log = CallLog::new();
        let reset = CredentialReset::forced(SecretString::from("x".repeat(24)));
        directory(&log).reset_credential("id-1", &reset).unwrap();

        assert_eq!(
            log.calls(),
            vec![Call::ResetCredential {
                id: "id-1".to_string(),
                force_change: true
            }]
        );
    }

    #[test]
    fn configured_failure_is_returned() {
        let log = CallLog::new();
        let directory = directory(&log).fail(
            DirectoryOp::RevokeSessions,
            ServiceError::new(ErrorKind::Throttled, "slow down"),
        );

        let err = directory.revoke_sessions("id-1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Throttled);
        assert_eq!(log.count("revoke-sessions"), 1);
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let log = CallLog::new();
        let err = directory(&log)
            .set_sign_in_enabled("missing", false)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
