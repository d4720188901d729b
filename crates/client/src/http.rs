//! Authenticated REST client.
//!
//! Every request carries the current bearer token. A 401 from any endpoint
//! clears the token and runs the unauthorized hook before the error reaches
//! the caller.

use std::sync::Arc;
use std::time::Duration;

use finwise_shared::{AppError, ApiConfig};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{TokenProvider, UnauthorizedHook};
use crate::error::{ClientError, ClientResult};

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Client for the budget REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHook>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_hook", &self.on_unauthorized.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ApiClientConfig, tokens: Arc<dyn TokenProvider>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            on_unauthorized: None,
        })
    }

    /// Registers the hook run on every 401 response.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: Arc<dyn UnauthorizedHook>) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET and decodes the JSON response.
    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(request, &Method::GET, path).await?;
        decode(response).await
    }

    /// Sends a POST with a JSON body and decodes the JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(request, &Method::POST, path).await?;
        decode(response).await
    }

    /// Sends a POST with a JSON body, ignoring the response body.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send(request, &Method::POST, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ClientResult<Response> {
        debug!(%method, path, "Sending request");
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, %method, path, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "Received response");
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "Session rejected, clearing token");
            self.tokens.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook.on_unauthorized();
            }
            return Err(ClientError::Unauthorized(message));
        }

        Err(ClientError::Api(AppError::from_status(status.as_u16(), message)))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Extracts the server message from an error body.
///
/// Reads `detail` (a string, or a list of validation errors with `msg`),
/// then `message`. Anything else yields an empty string.
async fn error_message(response: Response) -> String {
    let Ok(body) = response.bytes().await else {
        return String::new();
    };
    serde_json::from_slice::<Value>(&body)
        .map(|value| message_from_body(&value))
        .unwrap_or_default()
}

pub(crate) fn message_from_body(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(detail)) => return detail.clone(),
        Some(Value::Array(errors)) => {
            let joined = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return joined;
            }
        }
        _ => {}
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}
