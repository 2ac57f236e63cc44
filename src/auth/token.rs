//! Bearer token providers.

use std::cell::RefCell;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::service::{ErrorKind, ServiceError, ServiceResult};

/// Source of bearer tokens for one service.
pub trait TokenProvider {
    /// Return a token valid for the next request.
    fn token(&self) -> ServiceResult<String>;
}

/// A token obtained elsewhere and handed to us verbatim.
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    /// Wrap an existing bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> ServiceResult<String> {
        Ok(self.token.expose_secret().to_string())
    }
}

/// OAuth2 token response from the identity platform.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// OAuth2 error response from the identity platform.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Client-credentials flow with an in-memory token cache.
pub struct ClientCredentials {
    http_client: Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    scope: String,
    cached: RefCell<Option<CachedToken>>,
    /// Refresh this long before expiry (default: 5 minutes).
    grace_period: Duration,
}

impl ClientCredentials {
    /// Create a provider for `{login_endpoint}/{tenant}/oauth2/v2.0/token`.
    ///
    /// `resource` is the service root (e.g. `https://graph.microsoft.com`);
    /// the requested scope is `{resource}/.default`.
    pub fn new(
        login_endpoint: &str,
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: SecretString,
        resource: &str,
        timeout: StdDuration,
    ) -> crate::error::Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("offboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                login_endpoint.trim_end_matches('/'),
                tenant_id
            ),
            client_id: client_id.into(),
            client_secret,
            scope: format!("{}/.default", resource.trim_end_matches('/')),
            cached: RefCell::new(None),
            grace_period: Duration::minutes(5),
        })
    }

    /// Token endpoint this provider posts to.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Scope requested from the token endpoint.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[instrument(skip(self), fields(scope = %self.scope))]
    fn acquire_token(&self) -> ServiceResult<CachedToken> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", self.client_secret.expose_secret())
            .append_pair("scope", &self.scope)
            .finish();

        let response = self
            .http_client
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .map_err(|e| {
                ServiceError::new(ErrorKind::Transport, format!("Token request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let err = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) => ServiceError::new(ErrorKind::Unauthorized, body.error_description)
                    .with_code(body.error),
                Err(_) => ServiceError::new(
                    ErrorKind::Unauthorized,
                    format!("Token endpoint returned HTTP {}", status),
                ),
            };
            return Err(err);
        }

        let token: TokenResponse = response.json().map_err(|e| {
            ServiceError::new(
                ErrorKind::Transport,
                format!("Invalid token response: {}", e),
            )
        })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

impl TokenProvider for ClientCredentials {
    fn token(&self) -> ServiceResult<String> {
        if let Some(token) = self.cached.borrow().as_ref() {
            if !token.is_expired(self.grace_period) {
                debug!("Using cached token");
                return Ok(token.access_token.clone());
            }
        }

        debug!("Requesting access token");
        let fresh = self.acquire_token()?;
        let access_token = fresh.access_token.clone();
        *self.cached.borrow_mut() = Some(fresh);
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn provider(server: &MockServer) -> ClientCredentials {
        ClientCredentials::new(
            &server.base_url(),
            "contoso.onmicrosoft.com",
            "client-123",
            SecretString::from("s3cret".to_string()),
            "https://graph.microsoft.com/",
            StdDuration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn static_token_is_returned_verbatim() {
        let provider = StaticToken::new("eyJ0eXAi");
        assert_eq!(provider.token().unwrap(), "eyJ0eXAi");
    }

    #[test]
    fn builds_token_url_and_scope() {
        let server = MockServer::start();
        let provider = provider(&server);
        assert_eq!(
            provider.token_url(),
            format!("{}/contoso.onmicrosoft.com/oauth2/v2.0/token", server.base_url())
        );
        assert_eq!(provider.scope(), "https://graph.microsoft.com/.default");
    }

    #[test]
    fn cached_token_is_reused() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/contoso.onmicrosoft.com/oauth2/v2.0/token")
                .body_includes("grant_type=client_credentials")
                .body_includes("client_id=client-123");
            then.status(200).json_body(json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "tok-1"
            }));
        });

        let provider = provider(&server);
        assert_eq!(provider.token().unwrap(), "tok-1");
        assert_eq!(provider.token().unwrap(), "tok-1");
        mock.assert_calls(1);
    }

    #[test]
    fn token_inside_grace_period_is_refreshed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/contoso.onmicrosoft.com/oauth2/v2.0/token");
            then.status(200).json_body(json!({
                "token_type": "Bearer",
                "expires_in": 60,
                "access_token": "short-lived"
            }));
        });

        let provider = provider(&server);
        provider.token().unwrap();
        provider.token().unwrap();
        mock.assert_calls(2);
    }

    #[test]
    fn rejected_credentials_are_unauthorized() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/contoso.onmicrosoft.com/oauth2/v2.0/token");
            then.status(401).json_body(json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            }));
        });

        let err = provider(&server).token().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.code.as_deref(), Some("invalid_client"));
        assert!(err.message.contains("AADSTS7000215"));
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        let provider = ClientCredentials::new(
            "http://127.0.0.1:1",
            "tenant",
            "client",
            SecretString::from("x".to_string()),
            "https://graph.microsoft.com",
            StdDuration::from_secs(2),
        )
        .unwrap();
        assert_eq!(provider.token().unwrap_err().kind, ErrorKind::Transport);
    }
}
