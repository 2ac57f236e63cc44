//! Mailbox service: lookup and type conversion.
//!
//! - [`MailboxService`] - The operations the offboarding workflow needs
//! - [`ExchangeMailboxes`] - Exchange Online admin API implementation
//! - [`MockMailbox`] - In-memory implementation that records calls

pub mod exchange;
pub mod mock;

pub use exchange::ExchangeMailboxes;
pub use mock::MockMailbox;

use std::fmt;

use crate::service::{ServiceError, ServiceResult};

/// Failure reported by a mailbox service.
pub type MailboxError = ServiceError;

/// Mailbox recipient type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientType {
    /// A licensed user mailbox.
    Regular,
    /// A shared mailbox.
    Shared,
    /// Anything else (room, equipment, ...), kept by its service name.
    Other(String),
}

impl RecipientType {
    /// Map the service's `RecipientTypeDetails` value.
    pub fn from_details(details: &str) -> Self {
        match details {
            "UserMailbox" => Self::Regular,
            "SharedMailbox" => Self::Shared,
            other => Self::Other(other.to_string()),
        }
    }

    /// The value the service uses when setting this type.
    pub fn as_service_value(&self) -> &str {
        match self {
            Self::Regular => "Regular",
            Self::Shared => "Shared",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => f.write_str("user mailbox"),
            Self::Shared => f.write_str("shared mailbox"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// The mailbox attributes the workflow reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub principal_name: String,
    pub display_name: String,
    pub recipient_type: RecipientType,
    pub litigation_hold_enabled: bool,
    /// In-place hold identifiers, as reported by the service.
    pub in_place_holds: Vec<String>,
}

impl Mailbox {
    /// A regular mailbox with no holds.
    pub fn regular(principal_name: impl Into<String>) -> Self {
        let principal_name = principal_name.into();
        Self {
            display_name: principal_name.clone(),
            principal_name,
            recipient_type: RecipientType::Regular,
            litigation_hold_enabled: false,
            in_place_holds: Vec::new(),
        }
    }

    /// Whether the mailbox is already shared.
    pub fn is_shared(&self) -> bool {
        self.recipient_type == RecipientType::Shared
    }

    /// Descriptions of every hold on the mailbox.
    pub fn holds(&self) -> Vec<String> {
        let mut holds = Vec::new();
        if self.litigation_hold_enabled {
            holds.push("litigation hold".to_string());
        }
        match self.in_place_holds.len() {
            0 => {}
            1 => holds.push(format!("in-place hold {}", self.in_place_holds[0])),
            n => holds.push(format!(
                "{} in-place holds ({})",
                n,
                self.in_place_holds.join(", ")
            )),
        }
        holds
    }

    /// Whether any hold prevents conversion.
    pub fn has_holds(&self) -> bool {
        self.litigation_hold_enabled || !self.in_place_holds.is_empty()
    }
}

/// Mailbox operations used by the offboarding workflow.
pub trait MailboxService {
    /// Look up a mailbox by principal name; `Ok(None)` when there is none.
    fn get_mailbox(&self, principal: &str) -> ServiceResult<Option<Mailbox>>;

    /// Change the mailbox's recipient type.
    fn set_mailbox_type(&self, principal: &str, recipient_type: RecipientType)
        -> ServiceResult<()>;
}
