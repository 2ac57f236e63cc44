//! Config command implementation.
//!
//! The `offboard config` command shows the resolved configuration. The
//! client secret is never part of the config; only the name of the variable
//! that holds it is shown.

use crate::cli::args::ConfigArgs;
use crate::config::{validate_config, LoadedConfig};
use crate::error::{OffboardError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    loaded: LoadedConfig,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(loaded: LoadedConfig, args: ConfigArgs) -> Self {
        Self { loaded, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = &self.loaded.config;

        if self.args.json {
            let json = serde_json::to_string_pretty(config)
                .map_err(|e| OffboardError::Other(e.into()))?;
            ui.message(&json);
        } else {
            ui.message(&format!("# {}", self.loaded.source.describe()));
            let yaml = serde_yaml::to_string(config).map_err(|e| OffboardError::Other(e.into()))?;
            ui.message(yaml.trim_end());
        }

        let problems = validate_config(config);
        for problem in &problems {
            ui.warning(&problem.message);
        }

        if problems.is_empty() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, OffboardConfig};
    use crate::ui::MockUI;
    use std::path::PathBuf;

    fn loaded(config: OffboardConfig, source: ConfigSource) -> LoadedConfig {
        LoadedConfig { config, source }
    }

    #[test]
    fn shows_source_and_yaml() {
        let cmd = ConfigCommand::new(
            loaded(
                OffboardConfig {
                    tenant_id: Some("contoso.onmicrosoft.com".to_string()),
                    ..Default::default()
                },
                ConfigSource::Project(PathBuf::from("/work/offboard.yml")),
            ),
            ConfigArgs::default(),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("# /work/offboard.yml"));
        assert!(ui.has_message("tenant_id: contoso.onmicrosoft.com"));
        assert!(ui.has_message("client_secret_env: OFFBOARD_CLIENT_SECRET"));
    }

    #[test]
    fn json_output_parses() {
        let cmd = ConfigCommand::new(
            loaded(OffboardConfig::default(), ConfigSource::Defaults),
            ConfigArgs { json: true },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["settings"]["credential_length"], 24);
        assert_eq!(value["endpoints"]["graph"], "https://graph.microsoft.com");
    }

    #[test]
    fn invalid_config_warns_and_fails() {
        let mut config = OffboardConfig::default();
        config.settings.credential_length = 10;
        let cmd = ConfigCommand::new(loaded(config, ConfigSource::Defaults), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_warning("credential_length"));
    }
}
