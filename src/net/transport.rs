//! Raw HTTP transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Transport`] is the seam between the refresh pipeline and the network.
//! [`ReqwestTransport`] is the production implementation: one `reqwest`
//! client with a cookie jar, so session cookies set by sign-in and refresh
//! ride along on every later call. Tests substitute a scripted transport.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use serde::de::DeserializeOwned;

use super::types::{ApiError, ErrorResponse};
use crate::config::ClientConfig;

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A replayable API request. Owns everything needed to reissue it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, query string included.
    pub path: String,
    pub body: Option<serde_json::Value>,
    /// Set once the request has been through a refresh; a second 401 is terminal.
    pub(crate) retried: bool,
    /// Start-up "who am I" probe: a 401 means "signed out", not "session lost".
    pub(crate) startup_probe: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, retried: false, startup_probe: false }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Patch, path).with_body(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn as_startup_probe(mut self) -> Self {
        self.startup_probe = true;
        self
    }

    #[must_use]
    pub fn is_retried(&self) -> bool {
        self.retried
    }
}

/// Status plus raw body text. Decoding happens in the typed helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// A bodiless response, e.g. `204 No Content`.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::new(status, String::new())
    }

    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes as JSON `null`, so `()` and
    /// `Option<T>` targets accept `204` responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let text = if self.body.trim().is_empty() { "null" } else { self.body.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Build the normalized error for a failed response: the body's `message`
    /// when present, otherwise a generic status line.
    #[must_use]
    pub fn to_error(&self) -> ApiError {
        let message = serde_json::from_str::<ErrorResponse>(&self.body)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", self.status));
        ApiError::Status { status: self.status, message }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends a single request with no retry or refresh logic.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Non-success statuses are returned as responses;
    /// only connection-level failures are errors.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport with an in-memory cookie jar.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: reqwest::Url,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    /// Build the transport from client config.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = reqwest::Url::parse(&config.api_base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.api_base_url)))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, jar })
    }

    /// Read a cookie the server has set for the API origin.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        crate::auth::token::cookie_value(header, name).map(str::to_owned)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path);
        let mut builder = self.http.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(ApiResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_builder() {
        ApiError::InvalidUrl(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
