//! offboard - Interactive Microsoft 365 user offboarding.
//!
//! Takes a departing user through a fixed sequence of steps: block sign-in,
//! replace the password, revoke sessions and convert the mailbox to shared.
//! Only a failed identity lookup stops the run; every later failure is
//! reported and the next step still runs.
//!
//! # Modules
//!
//! - [`auth`] - Bearer token providers
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`directory`] - Directory service trait, Graph client and mock
//! - [`error`] - Error types and result aliases
//! - [`mailbox`] - Mailbox service trait, Exchange client and mock
//! - [`principal`] - Principal name validation
//! - [`runner`] - Offboarding workflow and report
//! - [`secrets`] - Credential generation and output masking
//! - [`service`] - Shared HTTP plumbing and error classification
//! - [`ui`] - Interactive prompts and terminal output
//!
//! # Example
//!
//! ```
//! use offboard::directory::{Identity, MockDirectory};
//! use offboard::mailbox::{Mailbox, MockMailbox};
//! use offboard::principal::PrincipalName;
//! use offboard::runner::{OffboardWorkflow, WorkflowOptions};
//! use offboard::service::CallLog;
//! use offboard::ui::MockUI;
//!
//! let log = CallLog::new();
//! let directory = MockDirectory::new(log.clone())
//!     .with_identity(Identity::new("id-1", "jdoe@contoso.com"));
//! let mailboxes = MockMailbox::new(log.clone())
//!     .with_mailbox(Mailbox::regular("jdoe@contoso.com"));
//!
//! let mut ui = MockUI::new();
//! let principal = PrincipalName::parse("jdoe@contoso.com").unwrap();
//! let report = OffboardWorkflow::new(&directory, &mailboxes, WorkflowOptions::default())
//!     .run(&principal, &mut ui);
//!
//! assert_eq!(report.exit_code(), 0);
//! assert_eq!(ui.successes().len(), 5);
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod mailbox;
pub mod principal;
pub mod runner;
pub mod secrets;
pub mod service;
pub mod ui;

pub use error::{OffboardError, Result};
