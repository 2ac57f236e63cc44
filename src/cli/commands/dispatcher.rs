//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::collections::HashMap;
use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config_from, LoadedConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result for a process exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: Option<PathBuf>,
    env: HashMap<String, String>,
    cwd: PathBuf,
}

impl CommandDispatcher {
    /// Create a dispatcher reading the process environment.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            env: std::env::vars().collect(),
            cwd: std::env::current_dir().unwrap_or_default(),
        }
    }

    /// Create a dispatcher with an explicit environment and working directory.
    pub fn with_env(
        config_path: Option<PathBuf>,
        env: HashMap<String, String>,
        cwd: PathBuf,
    ) -> Self {
        Self {
            config_path,
            env,
            cwd,
        }
    }

    fn load_config(&self) -> Result<LoadedConfig> {
        let home = dirs::home_dir();
        load_config_from(
            self.config_path.as_deref(),
            &self.env,
            &self.cwd,
            home.as_deref(),
        )
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(
                    self.load_config()?,
                    args.clone(),
                    self.env.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(self.load_config()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(
                    self.load_config()?,
                    RunArgs::default(),
                    self.env.clone(),
                );
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OffboardError;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn command_result_from_exit_code() {
        assert!(CommandResult::from_exit_code(0).success);
        let partial = CommandResult::from_exit_code(3);
        assert!(!partial.success);
        assert_eq!(partial.exit_code, 3);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::with_env(
            Some(temp.path().join("missing.yml")),
            HashMap::new(),
            temp.path().to_path_buf(),
        );
        let cli = Cli::parse_from(["offboard", "config"]);
        let mut ui = MockUI::new();

        let err = dispatcher.dispatch(&cli, &mut ui).unwrap_err();
        assert!(matches!(err, OffboardError::ConfigNotFound { .. }));
    }

    #[test]
    fn dispatches_config_command() {
        let temp = TempDir::new().unwrap();
        let dispatcher =
            CommandDispatcher::with_env(None, HashMap::new(), temp.path().to_path_buf());
        let cli = Cli::parse_from(["offboard", "config"]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("graph.microsoft.com"));
    }
}
