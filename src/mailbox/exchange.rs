//! Exchange Online admin API client.
//!
//! Cmdlets are invoked through `POST /adminapi/beta/{tenant}/InvokeCommand`
//! with a `CmdletInput` body; results come back in an OData `value` array.

use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::Result;
use crate::service::{ApiClient, ErrorKind, ServiceError, ServiceResult};

use super::{Mailbox, MailboxService, RecipientType};

/// `Get-Mailbox` result fields the workflow consumes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailboxRecord {
    #[serde(default)]
    user_principal_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    recipient_type_details: Option<String>,
    #[serde(default)]
    litigation_hold_enabled: bool,
    #[serde(default)]
    in_place_holds: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CmdletResult {
    #[serde(default)]
    value: Vec<MailboxRecord>,
}

/// Mailbox service backed by the Exchange Online admin API.
pub struct ExchangeMailboxes {
    api: ApiClient,
    tenant: String,
}

impl ExchangeMailboxes {
    /// Create a client for `tenant` rooted at `endpoint`.
    pub fn new(
        endpoint: &str,
        tenant: impl Into<String>,
        timeout: Duration,
        tokens: Box<dyn TokenProvider>,
    ) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new("exchange", endpoint, timeout, tokens)?,
            tenant: tenant.into(),
        })
    }

    fn invoke(&self, cmdlet: &str, parameters: Value) -> ServiceResult<Option<Value>> {
        debug!(cmdlet, "invoking cmdlet");
        let url = self
            .api
            .url(&["adminapi", "beta", &self.tenant, "InvokeCommand"]);
        let body = json!({
            "CmdletInput": {
                "CmdletName": cmdlet,
                "Parameters": parameters,
            }
        });
        self.api.send(Method::POST, url, Some(&body))
    }
}

impl MailboxService for ExchangeMailboxes {
    fn get_mailbox(&self, principal: &str) -> ServiceResult<Option<Mailbox>> {
        let body = match self.invoke("Get-Mailbox", json!({ "Identity": principal })) {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let Some(body) = body else {
            return Ok(None);
        };

        let result: CmdletResult = serde_json::from_value(body).map_err(|e| {
            ServiceError::new(
                ErrorKind::Transport,
                format!("Unexpected Get-Mailbox response: {}", e),
            )
        })?;

        Ok(result.value.into_iter().next().map(|record| Mailbox {
            principal_name: record
                .user_principal_name
                .unwrap_or_else(|| principal.to_string()),
            display_name: record
                .display_name
                .unwrap_or_else(|| principal.to_string()),
            recipient_type: record
                .recipient_type_details
                .as_deref()
                .map(RecipientType::from_details)
                .unwrap_or(RecipientType::Other("Unknown".to_string())),
            litigation_hold_enabled: record.litigation_hold_enabled,
            in_place_holds: record.in_place_holds,
        }))
    }

    fn set_mailbox_type(
        &self,
        principal: &str,
        recipient_type: RecipientType,
    ) -> ServiceResult<()> {
        self.invoke(
            "Set-Mailbox",
            json!({
                "Identity": principal,
                "Type": recipient_type.as_service_value(),
            }),
        )?;
        Ok(())
    }
}
