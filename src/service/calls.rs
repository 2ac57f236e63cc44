//! Ordered call recording shared by the in-memory service mocks.

use std::cell::RefCell;
use std::rc::Rc;

use crate::mailbox::RecipientType;

/// A single call made against a directory or mailbox service.
///
/// Credentials are never recorded; a credential reset only records whether
/// a change was forced at next sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Identity lookup by principal name.
    ResolveIdentity(String),
    /// Sign-in flag update by identity id.
    SetSignInEnabled { id: String, enabled: bool },
    /// Credential reset by identity id.
    ResetCredential { id: String, force_change: bool },
    /// Session revocation by identity id.
    RevokeSessions(String),
    /// Mailbox lookup by principal name.
    GetMailbox(String),
    /// Mailbox type change by principal name.
    SetMailboxType {
        principal: String,
        recipient_type: RecipientType,
    },
}

impl Call {
    /// Short operation name, independent of arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResolveIdentity(_) => "resolve",
            Self::SetSignInEnabled { .. } => "set-sign-in-enabled",
            Self::ResetCredential { .. } => "reset-credential",
            Self::RevokeSessions(_) => "revoke-sessions",
            Self::GetMailbox(_) => "get-mailbox",
            Self::SetMailboxType { .. } => "set-mailbox-type",
        }
    }
}

/// Shared, ordered log of service calls.
///
/// Clones share the same underlying log, so a directory mock and a mailbox
/// mock built from clones of one log record a single interleaved sequence.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call.
    pub fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of all calls in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Operation names of all calls in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(Call::name).collect()
    }

    /// Number of calls recorded.
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Whether no calls were recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Number of calls with the given operation name.
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.name() == name)
            .count()
    }
}
