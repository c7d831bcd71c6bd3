//! HTTP transport for the Snibox REST API.
//!
//! DESIGN
//! ======
//! `Transport` is the only seam between the resource services and the
//! network. `ReqwestTransport` is the production implementation; tests
//! swap in scripted mocks. Bodies are read as text first so non-2xx
//! replies keep their payload for logging.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode (send, status, parse) surfaces as a
//! `TransportError`. Callers in `service` log it and show a generic
//! message; the detail never reaches the user.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use serde_json::Value;

use super::types::HttpMethod;
use crate::config::ApiConfig;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Sends one JSON request and returns the parsed JSON reply.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Issue `method` against `path` with an optional JSON body.
    ///
    /// An empty 2xx body is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on network failure, non-2xx status, or
    /// a body that is not JSON.
    async fn request(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value, TransportError>;
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a client with the configured base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::HttpClientBuild`] if reqwest rejects the settings.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an API path (or an absolute link) to a full URL.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        let url = self.url_for(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(reqwest_method(method), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body: text });
        }

        parse_body(&text)
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

fn parse_body(text: &str) -> Result<Value, TransportError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| TransportError::Parse(e.to_string()))
}
