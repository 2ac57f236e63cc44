//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use offboard::config::{load_config_from, validate};
//! use std::collections::HashMap;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("offboard.yml"), "tenant_id: contoso.onmicrosoft.com").unwrap();
//!
//! let loaded = load_config_from(None, &HashMap::new(), temp.path(), None).unwrap();
//! validate(&loaded.config).unwrap();
//! assert_eq!(loaded.config.tenant_id.as_deref(), Some("contoso.onmicrosoft.com"));
//! ```
//!
//! # Configuration File Locations
//!
//! The first match wins:
//! 1. `--config PATH`
//! 2. `OFFBOARD_CONFIG`
//! 3. `./offboard.yml`
//! 4. `~/.offboard/config.yml`
//!
//! With no file the built-in defaults are used. `OFFBOARD_TENANT_ID` and
//! `OFFBOARD_CLIENT_ID` override the file's values.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    apply_env_overrides, discover, load_config, load_config_file, load_config_from, parse_config,
    ConfigSource, LoadedConfig, CLIENT_ID_ENV, CONFIG_ENV, TENANT_ID_ENV,
};
pub use schema::{Endpoints, OffboardConfig, Settings, DEFAULT_CLIENT_SECRET_ENV};
pub use validator::{validate, validate_config, ValidationError};
