//! Bearer-authenticated JSON client shared by the Graph and Exchange clients.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::{OffboardError, Result};

use super::{ErrorKind, ServiceError, ServiceResult};

/// `OData` error response envelope used by Graph and the Exchange admin API.
#[derive(Debug, Deserialize)]
struct ODataError {
    error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
struct ODataErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

/// JSON client for one remote service.
pub struct ApiClient {
    service: &'static str,
    http_client: Client,
    base_url: Url,
    tokens: Box<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// `service` is a short name used in log lines.
    pub fn new(
        service: &'static str,
        base_url: &str,
        timeout: Duration,
        tokens: Box<dyn TokenProvider>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| OffboardError::ConfigValidationError {
            message: format!("Invalid {} endpoint '{}': {}", service, base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OffboardError::ConfigValidationError {
                message: format!("Invalid {} endpoint '{}'", service, base_url),
            });
        }

        let http_client = Client::builder()
            .user_agent(concat!("offboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            service,
            http_client,
            base_url,
            tokens,
        })
    }

    /// Build a URL by appending percent-encoded path segments to the base.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and return the parsed JSON body, if any.
    ///
    /// Success responses without a body (e.g. 204) yield `None`. Failures are
    /// classified into a [`ServiceError`]; nothing is retried.
    pub fn send(&self, method: Method, url: Url, body: Option<&Value>) -> ServiceResult<Option<Value>> {
        let token = self.tokens.token()?;

        debug!(service = self.service, %method, path = url.path(), "sending request");

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(token)
            .header("Accept", "application/json");
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(None);
            }
            return serde_json::from_str(&text).map(Some).map_err(|e| {
                ServiceError::new(
                    ErrorKind::Transport,
                    format!("Invalid JSON from {}: {}", self.service, e),
                )
            });
        }

        debug!(service = self.service, %status, "request failed");

        let err = match serde_json::from_str::<ODataError>(&text) {
            Ok(odata) => {
                let kind =
                    ErrorKind::classify(status, odata.error.code.as_deref(), &odata.error.message);
                let err = ServiceError::new(kind, odata.error.message);
                match odata.error.code {
                    Some(code) => err.with_code(code),
                    None => err,
                }
            }
            Err(_) => {
                let message = if text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, text.trim())
                };
                ServiceError::new(ErrorKind::classify(status, None, &text), message)
            }
        };
        Err(err)
    }
}
