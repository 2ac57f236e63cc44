//! Run command implementation.
//!
//! The `offboard run` command offboards one user.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::auth::{token_provider, Resource};
use crate::cli::args::RunArgs;
use crate::config::{validate, LoadedConfig};
use crate::directory::{DirectoryService, GraphDirectory};
use crate::error::{OffboardError, Result};
use crate::mailbox::{ExchangeMailboxes, MailboxService};
use crate::principal::PrincipalName;
use crate::runner::{OffboardWorkflow, WorkflowOptions};
use crate::ui::{prompt_principal, OutputMode, Prompt, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prompt key for the go/no-go question (`OFFBOARD_PROMPT_PROCEED`).
pub const PROCEED_PROMPT_KEY: &str = "proceed";

/// The run command implementation.
pub struct RunCommand {
    loaded: LoadedConfig,
    args: RunArgs,
    env: HashMap<String, String>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(loaded: LoadedConfig, args: RunArgs, env: HashMap<String, String>) -> Self {
        Self { loaded, args, env }
    }

    /// Build the Graph and Exchange clients.
    ///
    /// No request is made here; tokens are fetched on first use.
    fn connect(&self) -> Result<(GraphDirectory, ExchangeMailboxes)> {
        let config = &self.loaded.config;
        let timeout = Duration::from_secs(config.settings.timeout_secs);

        let graph_tokens = token_provider(config, Resource::Graph, &self.env)?;
        let exchange_tokens = token_provider(config, Resource::Exchange, &self.env)?;

        let tenant = config
            .tenant_id
            .as_deref()
            .ok_or_else(|| OffboardError::MissingCredentials {
                service: Resource::Exchange.name().to_string(),
                message: "tenant_id is required for the Exchange admin API".to_string(),
            })?;

        let directory = GraphDirectory::new(&config.endpoints.graph, timeout, graph_tokens)?;
        let mailboxes =
            ExchangeMailboxes::new(&config.endpoints.exchange, tenant, timeout, exchange_tokens)?;

        Ok((directory, mailboxes))
    }

    /// Principal from `--user`, or prompted for.
    fn principal(&self, ui: &mut dyn UserInterface) -> Result<PrincipalName> {
        match &self.args.user {
            Some(user) => PrincipalName::parse(user),
            None => prompt_principal(ui),
        }
    }

    /// Effective connection settings shown in verbose mode.
    fn settings_table(&self) -> Table {
        let config = &self.loaded.config;
        Table::key_value([
            ("config", self.loaded.source.describe()),
            ("tenant_id", config.tenant_id.clone().unwrap_or_else(|| "-".to_string())),
            ("graph", config.endpoints.graph.clone()),
            ("exchange", config.endpoints.exchange.clone()),
            ("dry_run", self.args.dry_run.to_string()),
        ])
    }

    fn confirmed(&self, principal: &PrincipalName, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.args.yes || self.args.dry_run {
            return Ok(true);
        }

        let prompt = Prompt::confirm(
            PROCEED_PROMPT_KEY,
            format!(
                "Offboard {}? Sign-in will be blocked and the password replaced",
                principal
            ),
            false,
        );
        let answer = ui.prompt(&prompt)?;
        Ok(answer.as_bool().unwrap_or(false))
    }

    /// Run against already-constructed services.
    pub fn run_with(
        &self,
        directory: &dyn DirectoryService,
        mailbox: &dyn MailboxService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let principal = self.principal(ui)?;

        ui.show_header(&format!("Offboarding {}", principal));
        if ui.output_mode() == OutputMode::Verbose {
            ui.message(&self.settings_table().render());
        }

        if !self.confirmed(&principal, ui)? {
            ui.message("Cancelled; nothing was changed");
            if !ui.is_interactive() {
                ui.show_hint("Pass --yes to confirm in non-interactive mode");
            }
            return Ok(CommandResult::success());
        }

        if self.args.dry_run {
            ui.message("Dry run: no changes will be made");
        }

        let options = WorkflowOptions::from_settings(&self.loaded.config.settings, self.args.dry_run);
        let report = OffboardWorkflow::new(directory, mailbox, options).run(&principal, ui);

        debug!(
            exit_code = report.exit_code(),
            warnings = report.warning_count(),
            "run finished"
        );
        ui.show_summary(&report.summary());

        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        validate(&self.loaded.config)?;
        let (directory, mailboxes) = self.connect()?;
        self.run_with(&directory, &mailboxes, ui)
    }
}
