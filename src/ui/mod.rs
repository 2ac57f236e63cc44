//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for capturing output in tests
//! - [`read_until`] for validated prompt loops
//!
//! # Example
//!
//! ```
//! use offboard::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Offboarding");
//! ui.success("Sign-in disabled");
//! ```

pub mod input;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use input::{prompt_principal, read_until};
pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, OffboardTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, _mode: OutputMode) {}

    /// Display an informational message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show follow-up guidance that is not itself a status line.
    fn show_hint(&mut self, hint: &str);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for env overrides and mock lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// Free-form input prompt without a default.
    pub fn input(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }

    /// Yes/no prompt with a default answer.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Parse a yes/no answer the way prompt overrides spell it.
pub(crate) fn parse_bool_answer(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Status shown next to a step in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Step changed remote state.
    Success,
    /// Nothing to do, or informational note.
    Info,
    /// Step failed but the run continued.
    Warning,
    /// Step was refused by policy and needs manual action.
    Blocked,
    /// Step failed and ended the run.
    Fatal,
}

impl StatusKind {
    /// Plain icon for the status.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "○",
            Self::Warning => "⚠",
            Self::Blocked => "⊘",
            Self::Fatal => "✗",
        }
    }

    /// Icon styled with the theme.
    pub fn styled(&self, theme: &OffboardTheme) -> String {
        let style = match self {
            Self::Success => &theme.success,
            Self::Info => &theme.dim,
            Self::Warning => &theme.warning,
            Self::Blocked => &theme.blocked,
            Self::Fatal => &theme.error,
        };
        style.apply_to(self.icon()).to_string()
    }
}

/// One row of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Step label.
    pub name: String,
    /// Outcome status.
    pub status: StatusKind,
    /// Short detail text.
    pub detail: String,
}

/// End-of-run summary passed to [`UserInterface::show_summary`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Principal name the run targeted.
    pub principal: String,
    /// One row per executed step.
    pub rows: Vec<SummaryRow>,
    /// Whether the run was read-only.
    pub dry_run: bool,
}

impl RunSummary {
    /// Count rows with the given status.
    pub fn count(&self, status: StatusKind) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }
}

/// Check whether we are running under a CI system.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("TF_BUILD").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(
            PromptResult::String("jdoe@contoso.com".to_string()).as_string(),
            "jdoe@contoso.com"
        );
    }

    #[test]
    fn prompt_result_as_bool() {
        assert_eq!(PromptResult::Bool(false).as_bool(), Some(false));
        assert_eq!(PromptResult::String("true".to_string()).as_bool(), None);
    }

    #[test]
    fn confirm_prompt_stores_default() {
        let prompt = Prompt::confirm("proceed", "Continue?", false);
        assert_eq!(prompt.prompt_type, PromptType::Confirm);
        assert_eq!(prompt.default.as_deref(), Some("false"));
    }

    #[test]
    fn input_prompt_has_no_default() {
        let prompt = Prompt::input("user", "User principal name");
        assert_eq!(prompt.prompt_type, PromptType::Input);
        assert!(prompt.default.is_none());
    }

    #[test]
    fn parse_bool_answer_accepts_common_spellings() {
        assert!(parse_bool_answer("yes"));
        assert!(parse_bool_answer(" Y "));
        assert!(parse_bool_answer("1"));
        assert!(!parse_bool_answer("no"));
        assert!(!parse_bool_answer(""));
    }

    #[test]
    fn status_icons_are_distinct() {
        let icons = [
            StatusKind::Success.icon(),
            StatusKind::Info.icon(),
            StatusKind::Warning.icon(),
            StatusKind::Blocked.icon(),
            StatusKind::Fatal.icon(),
        ];
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn summary_counts_by_status() {
        let summary = RunSummary {
            principal: "a@b.c".into(),
            rows: vec![
                SummaryRow {
                    name: "one".into(),
                    status: StatusKind::Success,
                    detail: String::new(),
                },
                SummaryRow {
                    name: "two".into(),
                    status: StatusKind::Warning,
                    detail: String::new(),
                },
                SummaryRow {
                    name: "three".into(),
                    status: StatusKind::Success,
                    detail: String::new(),
                },
            ],
            dry_run: false,
        };
        assert_eq!(summary.count(StatusKind::Success), 2);
        assert_eq!(summary.count(StatusKind::Warning), 1);
        assert_eq!(summary.count(StatusKind::Fatal), 0);
    }
}
