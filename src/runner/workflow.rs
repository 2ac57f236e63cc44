//! Offboarding workflow execution.
//!
//! Steps run in a fixed order against the directory and mailbox services.
//! Only a failed identity lookup stops the run; every later failure becomes a
//! warning in the report and the next step runs anyway.

use secrecy::SecretString;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::directory::{CredentialReset, DirectoryService, Identity};
use crate::mailbox::{MailboxService, RecipientType};
use crate::principal::PrincipalName;
use crate::secrets::{generate_credential, OutputMasker, DEFAULT_CREDENTIAL_LENGTH};
use crate::service::ErrorKind;
use crate::ui::UserInterface;

use super::report::{OffboardReport, Outcome, Step, StepRecord};

/// Options for an offboarding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Skip every mutating call and report what would have happened.
    pub dry_run: bool,
    /// Length of the replacement credential.
    pub credential_length: usize,
    /// Shared mailbox size limit quoted in the license hint, in GB.
    pub shared_mailbox_limit_gb: u32,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            credential_length: DEFAULT_CREDENTIAL_LENGTH,
            shared_mailbox_limit_gb: 50,
        }
    }
}

impl WorkflowOptions {
    /// Options taken from the config settings.
    pub fn from_settings(settings: &Settings, dry_run: bool) -> Self {
        Self {
            dry_run,
            credential_length: settings.credential_length,
            shared_mailbox_limit_gb: settings.shared_mailbox_limit_gb,
        }
    }
}

/// Runs the offboarding steps for one user.
pub struct OffboardWorkflow<'a> {
    directory: &'a dyn DirectoryService,
    mailbox: &'a dyn MailboxService,
    options: WorkflowOptions,
}

impl<'a> OffboardWorkflow<'a> {
    /// Create a workflow over the given services.
    pub fn new(
        directory: &'a dyn DirectoryService,
        mailbox: &'a dyn MailboxService,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            directory,
            mailbox,
            options,
        }
    }

    /// Offboard `principal`, emitting one status line per executed step.
    pub fn run(&self, principal: &PrincipalName, ui: &mut dyn UserInterface) -> OffboardReport {
        let mut report = OffboardReport::new(principal.as_str(), self.options.dry_run);

        let identity = match self.resolve(principal) {
            Ok((identity, record)) => {
                emit(ui, &mut report, record);
                identity
            }
            Err(record) => {
                emit(ui, &mut report, record);
                return report;
            }
        };

        let record = self.disable_sign_in(&identity);
        emit(ui, &mut report, record);

        let record = self.reset_credential(&identity);
        emit(ui, &mut report, record);

        let record = self.revoke_sessions(&identity);
        emit(ui, &mut report, record);

        let record = self.convert_mailbox(&identity);
        emit(ui, &mut report, record);

        report
    }

    fn resolve(&self, principal: &PrincipalName) -> Result<(Identity, StepRecord), StepRecord> {
        let step = Step::ResolveIdentity;
        match self.directory.resolve_identity(principal.as_str()) {
            Ok(identity) => {
                let message = format!(
                    "Found {} ({}), id {}",
                    identity.display_name, identity.principal_name, identity.id
                );
                Ok((identity, record(step, Outcome::Success, message)))
            }
            Err(e) if e.is_not_found() => Err(record(
                step,
                Outcome::Fatal,
                format!(
                    "User {} not found in the directory; nothing was changed",
                    principal
                ),
            )),
            Err(e) => Err(record(
                step,
                Outcome::Fatal,
                format!("Could not look up {}: {}", principal, e),
            )),
        }
    }

    fn disable_sign_in(&self, identity: &Identity) -> StepRecord {
        let step = Step::DisableSignIn;

        if !identity.sign_in_enabled {
            return record(step, Outcome::NoOp, "Sign-in already disabled");
        }
        if self.options.dry_run {
            return record(step, Outcome::Note, "Would disable sign-in");
        }

        match self.directory.set_sign_in_enabled(&identity.id, false) {
            Ok(()) => record(step, Outcome::Success, "Sign-in disabled"),
            Err(e) => record(
                step,
                Outcome::Warning,
                format!("Failed to disable sign-in: {}", e),
            ),
        }
    }

    fn reset_credential(&self, identity: &Identity) -> StepRecord {
        let step = Step::ResetCredential;

        if self.options.dry_run {
            return record(
                step,
                Outcome::Note,
                "Would reset password and require a change at next sign-in",
            );
        }

        let credential: SecretString = generate_credential(self.options.credential_length);
        let mut masker = OutputMasker::new();
        masker.add_secret(&credential);

        let reset = CredentialReset::forced(credential);
        match self.directory.reset_credential(&identity.id, &reset) {
            Ok(()) => record(
                step,
                Outcome::Success,
                "Password reset; change required at next sign-in",
            ),
            Err(e) => record(
                step,
                Outcome::Warning,
                format!("Failed to reset password: {}", masker.mask(&e.to_string())),
            ),
        }
    }

    fn revoke_sessions(&self, identity: &Identity) -> StepRecord {
        let step = Step::RevokeSessions;

        if self.options.dry_run {
            return record(step, Outcome::Note, "Would revoke sign-in sessions");
        }

        match self.directory.revoke_sessions(&identity.id) {
            Ok(()) => record(step, Outcome::Success, "Revoked sign-in sessions"),
            Err(e) if e.kind == ErrorKind::NotFound => record(
                step,
                Outcome::Note,
                "Session revocation skipped: user not found (expected once sign-in is disabled)",
            ),
            Err(e) => record(
                step,
                Outcome::Warning,
                format!("Failed to revoke sessions: {}", e),
            ),
        }
    }

    fn convert_mailbox(&self, identity: &Identity) -> StepRecord {
        let step = Step::ConvertMailbox;
        let principal = identity.principal_name.as_str();

        let mailbox = match self.mailbox.get_mailbox(principal) {
            Ok(Some(mailbox)) => mailbox,
            Ok(None) => {
                return record(step, Outcome::NoOp, "No mailbox found; skipping conversion")
            }
            Err(e) => {
                return record(
                    step,
                    Outcome::Warning,
                    format!("Failed to look up mailbox: {}", e),
                )
            }
        };

        if mailbox.is_shared() {
            return record(step, Outcome::NoOp, "Mailbox is already shared");
        }

        if mailbox.has_holds() {
            return record(
                step,
                Outcome::Blocked,
                format!(
                    "Mailbox has {}; remove the hold manually before converting to shared",
                    mailbox.holds().join(" and ")
                ),
            );
        }

        if self.options.dry_run {
            return record(step, Outcome::Note, "Would convert mailbox to shared");
        }

        match self.mailbox.set_mailbox_type(principal, RecipientType::Shared) {
            Ok(()) => StepRecord {
                hint: Some(format!(
                    "If the mailbox is under {} GB, its license can now be removed",
                    self.options.shared_mailbox_limit_gb
                )),
                ..record(step, Outcome::Success, "Mailbox converted to shared")
            },
            Err(e) => record(
                step,
                Outcome::Warning,
                format!("Failed to convert mailbox: {}", e),
            ),
        }
    }
}

fn record(step: Step, outcome: Outcome, message: impl Into<String>) -> StepRecord {
    StepRecord {
        step,
        outcome,
        message: message.into(),
        hint: None,
    }
}

/// Show a record's status line (and hint), log it, and append it to the report.
fn emit(ui: &mut dyn UserInterface, report: &mut OffboardReport, record: StepRecord) {
    let step = record.step.label();
    match record.outcome {
        Outcome::Success => {
            info!(step, "{}", record.message);
            ui.success(&record.message);
        }
        Outcome::NoOp | Outcome::Note => {
            info!(step, "{}", record.message);
            ui.message(&record.message);
        }
        Outcome::Blocked | Outcome::Warning => {
            warn!(step, "{}", record.message);
            ui.warning(&record.message);
        }
        Outcome::Fatal => {
            error!(step, "{}", record.message);
            ui.error(&record.message);
        }
    }

    if let Some(hint) = &record.hint {
        ui.show_hint(hint);
    }

    report.records.push(record);
}
