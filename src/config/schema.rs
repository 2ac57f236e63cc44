//! Configuration schema definitions for offboard.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};

use crate::secrets::DEFAULT_CREDENTIAL_LENGTH;

/// Environment variable that holds the app registration's client secret
/// unless the config names a different one.
pub const DEFAULT_CLIENT_SECRET_ENV: &str = "OFFBOARD_CLIENT_SECRET";

/// Root configuration structure for `offboard.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffboardConfig {
    /// Tenant id or primary domain (e.g. `contoso.onmicrosoft.com`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// App registration (client) id used for the client-credentials flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Name of the environment variable holding the client secret.
    /// The secret itself never lives in the config file.
    #[serde(default = "default_client_secret_env")]
    pub client_secret_env: String,

    /// Service endpoints
    pub endpoints: Endpoints,

    /// Workflow settings
    pub settings: Settings,
}

impl Default for OffboardConfig {
    fn default() -> Self {
        Self {
            tenant_id: None,
            client_id: None,
            client_secret_env: default_client_secret_env(),
            endpoints: Endpoints::default(),
            settings: Settings::default(),
        }
    }
}

fn default_client_secret_env() -> String {
    DEFAULT_CLIENT_SECRET_ENV.to_string()
}

/// Root URLs of the remote services.
///
/// Overridable so a sovereign cloud or a local test server can be targeted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Microsoft Graph root
    pub graph: String,
    /// Exchange Online admin API root
    pub exchange: String,
    /// Identity platform (token issuer) root
    pub login: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            graph: "https://graph.microsoft.com".to_string(),
            exchange: "https://outlook.office365.com".to_string(),
            login: "https://login.microsoftonline.com".to_string(),
        }
    }
}

/// Workflow tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of the generated replacement credential (minimum 20)
    pub credential_length: usize,

    /// Size limit of an unlicensed shared mailbox, in GB (used in the
    /// license hint after conversion)
    pub shared_mailbox_limit_gb: u32,

    /// HTTP timeout per request, in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential_length: DEFAULT_CREDENTIAL_LENGTH,
            shared_mailbox_limit_gb: 50,
            timeout_secs: 30,
        }
    }
}
