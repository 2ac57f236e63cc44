//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{OffboardError, Result};

use super::{
    parse_bool_answer, OutputMode, Prompt, PromptResult, PromptType, RunSummary, StatusKind,
    UserInterface,
};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "OFFBOARD_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `OFFBOARD_PROMPT_<KEY>` environment variables
/// or the prompt's default; a prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        println!("○ {}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned();

        match answer {
            Some(value) if prompt.prompt_type == PromptType::Confirm => {
                Ok(PromptResult::Bool(parse_bool_answer(&value)))
            }
            Some(value) => Ok(PromptResult::String(value)),
            None => Err(OffboardError::InputExhausted {
                prompt: format!("{} (set {} or pass it as a flag)", prompt.key, env_key),
            }),
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_decoration() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        println!("  {}", hint);
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_decoration() {
            return;
        }
        println!();
        for row in &summary.rows {
            println!("  {} {:<20} {}", row.status.icon(), row.name, row.detail);
        }
        println!(
            "  {} · {} changed · {} warnings",
            summary.principal,
            summary.count(StatusKind::Success),
            summary.count(StatusKind::Warning) + summary.count(StatusKind::Blocked),
        );
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
