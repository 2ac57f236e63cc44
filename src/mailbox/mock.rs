//! In-memory mailbox service for tests and dry runs of the workflow.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::service::{Call, CallLog, ServiceError, ServiceResult};

use super::{Mailbox, MailboxService, RecipientType};

/// Mailbox service that keeps mailboxes in memory and records every call.
///
/// # Example
///
/// ```
/// use offboard::mailbox::{Mailbox, MailboxService, MockMailbox, RecipientType};
/// use offboard::service::CallLog;
///
/// let log = CallLog::new();
/// let mailboxes = MockMailbox::new(log.clone())
///     .with_mailbox(Mailbox::regular("jdoe@contoso.com"));
///
/// mailboxes.set_mailbox_type("jdoe@contoso.com", RecipientType::Shared).unwrap();
/// let mailbox = mailboxes.get_mailbox("jdoe@contoso.com").unwrap().unwrap();
/// assert!(mailbox.is_shared());
/// assert_eq!(log.names(), vec!["set-mailbox-type", "get-mailbox"]);
/// ```
pub struct MockMailbox {
    log: CallLog,
    mailboxes: RefCell<HashMap<String, Mailbox>>,
    get_failure: Option<ServiceError>,
    set_failure: Option<ServiceError>,
}

impl MockMailbox {
    /// Create an empty service recording into `log`.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            mailboxes: RefCell::new(HashMap::new()),
            get_failure: None,
            set_failure: None,
        }
    }

    /// Add a mailbox, keyed by its principal name.
    pub fn with_mailbox(self, mailbox: Mailbox) -> Self {
        self.mailboxes
            .borrow_mut()
            .insert(mailbox.principal_name.to_lowercase(), mailbox);
        self
    }

    /// Make every `get_mailbox` call fail with `error`.
    pub fn fail_get(mut self, error: ServiceError) -> Self {
        self.get_failure = Some(error);
        self
    }

    /// Make every `set_mailbox_type` call fail with `error`.
    pub fn fail_set(mut self, error: ServiceError) -> Self {
        self.set_failure = Some(error);
        self
    }

    /// Current state of a mailbox.
    pub fn mailbox(&self, principal: &str) -> Option<Mailbox> {
        self.mailboxes
            .borrow()
            .get(&principal.to_lowercase())
            .cloned()
    }
}

impl MailboxService for MockMailbox {
    fn get_mailbox(&self, principal: &str) -> ServiceResult<Option<Mailbox>> {
        self.log.record(Call::GetMailbox(principal.to_string()));
        if let Some(err) = &self.get_failure {
            return Err(err.clone());
        }
        Ok(self.mailbox(principal))
    }

    fn set_mailbox_type(
        &self,
        principal: &str,
        recipient_type: RecipientType,
    ) -> ServiceResult<()> {
        self.log.record(Call::SetMailboxType {
            principal: principal.to_string(),
            recipient_type: recipient_type.clone(),
        });
        if let Some(err) = &self.set_failure {
            return Err(err.clone());
        }

        match self.mailboxes.borrow_mut().get_mut(&principal.to_lowercase()) {
            Some(mailbox) => {
                mailbox.recipient_type = recipient_type;
                Ok(())
            }
            None => Err(ServiceError::not_found(format!(
                "Mailbox '{}' couldn't be found",
                principal
            ))),
        }
    }
}
