//! Authentication against the directory and mailbox services.
//!
//! Each service gets its own [`TokenProvider`]. A bearer token supplied in
//! the environment is used as-is; otherwise the app registration from the
//! config runs the client-credentials flow.

pub mod token;

pub use token::{ClientCredentials, StaticToken, TokenProvider};

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use crate::config::OffboardConfig;
use crate::error::{OffboardError, Result};

/// Remote service a token is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Microsoft Graph (directory)
    Graph,
    /// Exchange Online admin API (mailboxes)
    Exchange,
}

impl Resource {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Exchange => "exchange",
        }
    }

    /// Environment variable holding a pre-issued bearer token.
    pub fn token_env(&self) -> &'static str {
        match self {
            Self::Graph => "OFFBOARD_GRAPH_TOKEN",
            Self::Exchange => "OFFBOARD_EXCHANGE_TOKEN",
        }
    }

    /// Service root used to build the `.default` scope.
    pub fn endpoint<'a>(&self, config: &'a OffboardConfig) -> &'a str {
        match self {
            Self::Graph => &config.endpoints.graph,
            Self::Exchange => &config.endpoints.exchange,
        }
    }
}

/// Choose a token provider for `resource`.
///
/// A static token in the environment wins over the client-credentials flow.
///
/// # Errors
///
/// Returns `MissingCredentials` when neither a static token nor a complete
/// app registration (tenant, client id, secret) is available.
pub fn token_provider(
    config: &OffboardConfig,
    resource: Resource,
    env: &HashMap<String, String>,
) -> Result<Box<dyn TokenProvider>> {
    if let Some(token) = env.get(resource.token_env()).filter(|t| !t.trim().is_empty()) {
        debug!(service = resource.name(), "using static bearer token");
        return Ok(Box::new(StaticToken::new(token.trim())));
    }

    let secret = env
        .get(&config.client_secret_env)
        .filter(|s| !s.is_empty());

    match (&config.tenant_id, &config.client_id, secret) {
        (Some(tenant), Some(client), Some(secret)) => {
            debug!(service = resource.name(), "using client credentials");
            let provider = ClientCredentials::new(
                &config.endpoints.login,
                tenant,
                client.clone(),
                SecretString::from(secret.clone()),
                resource.endpoint(config),
                Duration::from_secs(config.settings.timeout_secs),
            )?;
            Ok(Box::new(provider))
        }
        (tenant, client, secret) => {
            let mut missing = Vec::new();
            if tenant.is_none() {
                missing.push("tenant_id".to_string());
            }
            if client.is_none() {
                missing.push("client_id".to_string());
            }
            if secret.is_none() {
                missing.push(config.client_secret_env.clone());
            }
            Err(OffboardError::MissingCredentials {
                service: resource.name().to_string(),
                message: format!(
                    "set {} or configure an app registration (missing: {})",
                    resource.token_env(),
                    missing.join(", ")
                ),
            })
        }
    }
}
