//! Per-step outcomes and the run report.

use std::fmt;

use crate::ui::{RunSummary, StatusKind, SummaryRow};

/// Exit code for a run where every step succeeded or had nothing to do.
pub const EXIT_CLEAN: i32 = 0;

/// Exit code for a run that stopped at identity resolution.
pub const EXIT_FATAL: i32 = 1;

/// Exit code for a run that finished with warnings or blocked steps.
pub const EXIT_PARTIAL: i32 = 3;

/// The offboarding steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ResolveIdentity,
    DisableSignIn,
    ResetCredential,
    RevokeSessions,
    ConvertMailbox,
}

impl Step {
    /// Every step in execution order.
    pub const ALL: [Step; 5] = [
        Step::ResolveIdentity,
        Step::DisableSignIn,
        Step::ResetCredential,
        Step::RevokeSessions,
        Step::ConvertMailbox,
    ];

    /// Label used in the summary.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResolveIdentity => "Resolve identity",
            Self::DisableSignIn => "Disable sign-in",
            Self::ResetCredential => "Reset password",
            Self::RevokeSessions => "Revoke sessions",
            Self::ConvertMailbox => "Convert mailbox",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Remote state was changed.
    Success,
    /// Nothing needed doing.
    NoOp,
    /// A benign failure or a skipped mutation, reported for information.
    Note,
    /// Refused by policy; needs manual action.
    Blocked,
    /// Failed; the run continued.
    Warning,
    /// Failed; the run stopped.
    Fatal,
}

impl Outcome {
    /// Summary status for this outcome.
    pub fn status(&self) -> StatusKind {
        match self {
            Self::Success => StatusKind::Success,
            Self::NoOp | Self::Note => StatusKind::Info,
            Self::Blocked => StatusKind::Blocked,
            Self::Warning => StatusKind::Warning,
            Self::Fatal => StatusKind::Fatal,
        }
    }

    /// Whether the run should finish with a non-clean exit.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Blocked | Self::Warning | Self::Fatal)
    }
}

/// The recorded result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: Outcome,
    /// The status line shown to the operator.
    pub message: String,
    /// Follow-up guidance, shown separately from the status line.
    pub hint: Option<String>,
}

/// Outcome of one offboarding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffboardReport {
    pub principal: String,
    pub records: Vec<StepRecord>,
    pub dry_run: bool,
}

impl OffboardReport {
    /// Create an empty report.
    pub fn new(principal: impl Into<String>, dry_run: bool) -> Self {
        Self {
            principal: principal.into(),
            records: Vec::new(),
            dry_run,
        }
    }

    /// Record for `step`, if it executed.
    pub fn record(&self, step: Step) -> Option<&StepRecord> {
        self.records.iter().find(|r| r.step == step)
    }

    /// Whether the run stopped at a fatal step.
    pub fn is_fatal(&self) -> bool {
        self.records.iter().any(|r| r.outcome == Outcome::Fatal)
    }

    /// Number of warnings, including blocked steps.
    pub fn warning_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Warning | Outcome::Blocked))
            .count()
    }

    /// Count records with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            EXIT_FATAL
        } else if self.records.iter().any(|r| r.outcome.needs_attention()) {
            EXIT_PARTIAL
        } else {
            EXIT_CLEAN
        }
    }

    /// Summary rows for the UI.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            principal: self.principal.clone(),
            rows: self
                .records
                .iter()
                .map(|r| SummaryRow {
                    name: r.step.label().to_string(),
                    status: r.outcome.status(),
                    detail: r.message.clone(),
                })
                .collect(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: Step, outcome: Outcome) -> StepRecord {
        StepRecord {
            step,
            outcome,
            message: format!("{} {:?}", step, outcome),
            hint: None,
        }
    }

    #[test]
    fn clean_run_exits_zero() {
        let mut report = OffboardReport::new("jdoe@contoso.com", false);
        report.records.push(record(Step::ResolveIdentity, Outcome::Success));
        report.records.push(record(Step::DisableSignIn, Outcome::NoOp));
        report.records.push(record(Step::RevokeSessions, Outcome::Note));

        assert!(!report.is_fatal());
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.exit_code(), EXIT_CLEAN);
    }

    #[test]
    fn blocked_step_is_partial() {
        let mut report = OffboardReport::new("jdoe@contoso.com", false);
        report.records.push(record(Step::ResolveIdentity, Outcome::Success));
        report.records.push(record(Step::ConvertMailbox, Outcome::Blocked));

        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.exit_code(), EXIT_PARTIAL);
    }

    #[test]
    fn fatal_wins() {
        let mut report = OffboardReport::new("ghost@contoso.com", false);
        report.records.push(record(Step::ResolveIdentity, Outcome::Fatal));

        assert!(report.is_fatal());
        assert_eq!(report.exit_code(), EXIT_FATAL);
    }

    #[test]
    fn summary_mirrors_records() {
        let mut report = OffboardReport::new("jdoe@contoso.com", true);
        report.records.push(record(Step::ResolveIdentity, Outcome::Success));
        report.records.push(record(Step::DisableSignIn, Outcome::Warning));

        let summary = report.summary();
        assert!(summary.dry_run);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].name, "Resolve identity");
        assert_eq!(summary.rows[1].status, StatusKind::Warning);
        assert_eq!(summary.count(StatusKind::Success), 1);
    }

    #[test]
    fn lookup_by_step() {
        let mut report = OffboardReport::new("jdoe@contoso.com", false);
        report.records.push(record(Step::ResolveIdentity, Outcome::Success));

        assert!(report.record(Step::ResolveIdentity).is_some());
        assert!(report.record(Step::ConvertMailbox).is_none());
    }
}
