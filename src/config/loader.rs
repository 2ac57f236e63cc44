//! Configuration file discovery and loading.
//!
//! This module handles finding the configuration file, parsing it and
//! layering environment overrides on top.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::OffboardConfig;
use crate::error::{OffboardError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "OFFBOARD_CONFIG";

/// Environment variable overriding `tenant_id`.
pub const TENANT_ID_ENV: &str = "OFFBOARD_TENANT_ID";

/// Environment variable overriding `client_id`.
pub const CLIENT_ID_ENV: &str = "OFFBOARD_CLIENT_ID";

/// Config file name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "offboard.yml";

/// Where a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named with `--config` or `OFFBOARD_CONFIG`
    Explicit(PathBuf),
    /// `./offboard.yml`
    Project(PathBuf),
    /// `~/.offboard/config.yml`
    UserGlobal(PathBuf),
    /// No file; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Path of the file, if one was read.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::UserGlobal(p) => Some(p),
            Self::Defaults => None,
        }
    }

    /// Human-readable description.
    pub fn describe(&self) -> String {
        match self.path() {
            Some(p) => p.display().to_string(),
            None => "built-in defaults".to_string(),
        }
    }
}

/// A parsed configuration with environment overrides applied.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The effective configuration
    pub config: OffboardConfig,
    /// Where the file came from
    pub source: ConfigSource,
}

/// Find the configuration file.
///
/// Order:
/// 1. `explicit` (from `--config`)
/// 2. `OFFBOARD_CONFIG`
/// 3. `offboard.yml` in `cwd`
/// 4. `.offboard/config.yml` under `home`
///
/// Explicit paths are returned whether or not they exist so a typo is
/// reported instead of silently falling back to defaults.
pub fn discover(
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
    cwd: &Path,
    home: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = env.get(CONFIG_ENV).filter(|v| !v.trim().is_empty()) {
        return ConfigSource::Explicit(PathBuf::from(path));
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return ConfigSource::Project(project);
    }

    if let Some(home) = home {
        let global = home.join(".offboard").join("config.yml");
        if global.is_file() {
            return ConfigSource::UserGlobal(global);
        }
    }

    ConfigSource::Defaults
}

/// Load a single config file and parse it into [`OffboardConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<OffboardConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OffboardError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OffboardError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`OffboardConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<OffboardConfig> {
    if content.trim().is_empty() {
        return Ok(OffboardConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| OffboardError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `OFFBOARD_TENANT_ID` / `OFFBOARD_CLIENT_ID` on top of file values.
pub fn apply_env_overrides(config: &mut OffboardConfig, env: &HashMap<String, String>) {
    if let Some(tenant) = non_empty(env, TENANT_ID_ENV) {
        config.tenant_id = Some(tenant);
    }
    if let Some(client) = non_empty(env, CLIENT_ID_ENV) {
        config.client_id = Some(client);
    }
}

fn non_empty(env: &HashMap<String, String>, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Discover, parse and apply environment overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicitly named file doesn't exist and
/// `ConfigParseError` if the file is invalid YAML.
pub fn load_config_from(
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<LoadedConfig> {
    let source = discover(explicit, env, cwd, home);

    let mut config = match source.path() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config_file(path)?
        }
        None => {
            debug!("no config file found, using defaults");
            OffboardConfig::default()
        }
    };

    apply_env_overrides(&mut config, env);

    Ok(LoadedConfig { config, source })
}

/// Load configuration for the current process.
///
/// Uses the process environment, the current directory and the user's home
/// directory.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir();
    load_config_from(explicit, &env, &cwd, home.as_deref())
}
