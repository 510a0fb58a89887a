//! Request construction and transport for the n8n public API.

use reqwest::{Client, Method, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Header carrying the API token.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Prefix shared by every public API path.
const API_PREFIX: &str = "/api/v1";

/// A single API call, with a path relative to the instance base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path starting with `/api/v1`.
    pub path: String,
    /// JSON body, sent verbatim.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Create a request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a body. Empty bodies are dropped.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }
}

/// `/api/v1/{entity}`
pub fn collection_path(entity: &str) -> String {
    format!("{API_PREFIX}/{entity}")
}

/// `/api/v1/{entity}/{id}`
pub fn member_path(entity: &str, id: &str) -> String {
    format!("{API_PREFIX}/{entity}/{id}")
}

/// `/api/v1/{entity}/{id}/{action}`
pub fn member_action_path(entity: &str, id: &str, action: &str) -> String {
    format!("{API_PREFIX}/{entity}/{id}/{action}")
}

/// Something that can execute an [`ApiRequest`] and return the raw body.
pub trait Transport {
    /// Send one request. Non-2xx responses are errors.
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>>;
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport bound to one instance and token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Shared reqwest client.
    client: Client,
    /// Instance URL without a trailing slash.
    base_url: String,
    /// API token sent with every request.
    api_token: String,
}

impl HttpClient {
    /// Build a client from stored credentials.
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|error| Error::Request {
            url: url.clone(),
            source: error,
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|error| Error::Request {
            url: url.clone(),
            source: error,
        })?;

        debug!(status = %status, bytes = body.len(), "received response");
        check_status(status, &body)?;
        Ok(body.to_vec())
    }
}

/// Reject any status outside 200..=299, keeping the body for the message.
pub fn check_status(status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(Error::Api {
        status: status.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

/// Pretty-print a JSON response, falling back to the raw text.
pub fn format_response(data: &[u8]) -> String {
    match serde_json::from_slice::<Value>(data) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(data).into_owned()),
        Err(_) => String::from_utf8_lossy(data).into_owned(),
    }
}
