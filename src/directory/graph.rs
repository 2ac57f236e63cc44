//! Microsoft Graph directory client.

use std::time::Duration;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::Result;
use crate::service::{ApiClient, ErrorKind, ServiceError, ServiceResult};

use super::{CredentialReset, DirectoryService, Identity};

const USER_SELECT: &str = "id,displayName,userPrincipalName,accountEnabled";

/// Graph user resource, restricted to [`USER_SELECT`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphUser {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    user_principal_name: Option<String>,
    /// Omitted by Graph for some synced accounts; treated as enabled.
    #[serde(default)]
    account_enabled: Option<bool>,
}

/// Directory service backed by Microsoft Graph v1.0.
pub struct GraphDirectory {
    api: ApiClient,
}

impl GraphDirectory {
    /// Create a client rooted at `endpoint` (e.g. `https://graph.microsoft.com`).
    pub fn new(endpoint: &str, timeout: Duration, tokens: Box<dyn TokenProvider>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new("graph", endpoint, timeout, tokens)?,
        })
    }

    fn patch_user(&self, id: &str, body: serde_json::Value) -> ServiceResult<()> {
        let url = self.api.url(&["v1.0", "users", id]);
        self.api.send(Method::PATCH, url, Some(&body))?;
        Ok(())
    }
}

impl DirectoryService for GraphDirectory {
    fn resolve_identity(&self, principal: &str) -> ServiceResult<Identity> {
        let mut url = self.api.url(&["v1.0", "users", principal]);
        url.query_pairs_mut().append_pair("$select", USER_SELECT);

        let body = self
            .api
            .send(Method::GET, url, None)?
            .ok_or_else(|| ServiceError::new(ErrorKind::Service, "Empty user response"))?;

        let user: GraphUser = serde_json::from_value(body).map_err(|e| {
            ServiceError::new(ErrorKind::Transport, format!("Unexpected user response: {}", e))
        })?;

        debug!(id = %user.id, "resolved user");

        let principal_name = user
            .user_principal_name
            .unwrap_or_else(|| principal.to_string());
        Ok(Identity {
            id: user.id,
            display_name: user.display_name.unwrap_or_else(|| principal_name.clone()),
            principal_name,
            sign_in_enabled: user.account_enabled.unwrap_or(true),
        })
    }

    fn set_sign_in_enabled(&self, id: &str, enabled: bool) -> ServiceResult<()> {
        self.patch_user(id, json!({ "accountEnabled": enabled }))
    }

    fn reset_credential(&self, id: &str, reset: &CredentialReset) -> ServiceResult<()> {
        self.patch_user(
            id,
            json!({
                "passwordProfile": {
                    "password": reset.credential.expose_secret(),
                    "forceChangePasswordNextSignIn": reset.force_change_on_next_sign_in,
                }
            }),
        )
    }

    fn revoke_sessions(&self, id: &str) -> ServiceResult<()> {
        let url = self.api.url(&["v1.0", "users", id, "revokeSignInSessions"]);
        self.api.send(Method::POST, url, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use httpmock::prelude::*;
    use secrecy::SecretString;

    fn client(server: &MockServer) -> GraphDirectory {
        GraphDirectory::new(
            &server.base_url(),
            Duration::from_secs(5),
            Box::new(StaticToken::new("graph-token")),
        )
        .unwrap()
    }

    #[test]
    fn resolve_selects_fields_and_maps_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1.0/users/jdoe@contoso.com")
                .query_param("$select", USER_SELECT)
                .header("authorization", "Bearer graph-token");
            then.status(200).json_body(json!({
                "id": "4f1c-id",
                "displayName": "Jane Doe",
                "userPrincipalName": "jdoe@contoso.com",
                "accountEnabled": false
            }));
        });

        let identity = client(&server).resolve_identity("jdoe@contoso.com").unwrap();

        mock.assert();
        assert_eq!(identity.id, "4f1c-id");
        assert_eq!(identity.display_name, "Jane Doe");
        assert!(!identity.sign_in_enabled);
    }

    #[test]
    fn missing_account_enabled_counts_as_enabled() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/users/jdoe@contoso.com");
            then.status(200).json_body(json!({"id": "4f1c-id"}));
        });

        let identity = client(&server).resolve_identity("jdoe@contoso.com").unwrap();
        assert!(identity.sign_in_enabled);
        assert_eq!(identity.principal_name, "jdoe@contoso.com");
        assert_eq!(identity.display_name, "jdoe@contoso.com");
    }

    #[test]
    fn unknown_user_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/users/ghost@contoso.com");
            then.status(404).json_body(json!({
                "error": {
                    "code": "Request_ResourceNotFound",
                    "message": "Resource 'ghost@contoso.com' does not exist or one of its queried reference-property objects are not present."
                }
            }));
        });

        let err = client(&server)
            .resolve_identity("ghost@contoso.com")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn disable_patches_account_enabled() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/v1.0/users/4f1c-id")
                .json_body(json!({"accountEnabled": false}));
            then.status(204);
        });

        client(&server).set_sign_in_enabled("4f1c-id", false).unwrap();
        mock.assert();
    }

    #[test]
    fn reset_sends_password_profile() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/v1.0/users/4f1c-id").json_body(json!({
                "passwordProfile": {
                    "password": "N3w-Cr3dential-Value!!",
                    "forceChangePasswordNextSignIn": true
                }
            }));
            then.status(204);
        });

        let reset = CredentialReset::forced(SecretString::from(
            "N3w-Cr3dential-Value!!".to_string(),
        ));
        client(&server).reset_credential("4f1c-id", &reset).unwrap();
        mock.assert();
    }

    #[test]
    fn revoke_posts_to_action() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1.0/users/4f1c-id/revokeSignInSessions");
            then.status(200)
                .json_body(json!({"@odata.context": "$metadata#Edm.Boolean", "value": true}));
        });

        client(&server).revoke_sessions("4f1c-id").unwrap();
        mock.assert();
    }

    #[test]
    fn forbidden_is_classified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PATCH).path("/v1.0/users/4f1c-id");
            then.status(403).json_body(json!({
                "error": {
                    "code": "Authorization_RequestDenied",
                    "message": "Insufficient privileges to complete the operation."
                }
            }));
        });

        let err = client(&server)
            .set_sign_in_enabled("4f1c-id", false)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.code.as_deref(), Some("Authorization_RequestDenied"));
    }
}
