//! Shared HTTP client for the GitHub REST API.
//!
//! Provides a minimal client with `token` auth,
//! generic GET/PUT helpers, and the domain methods ghshare needs (contents
//! writes, repository lookup). Non-success responses surface the API's own
//! `message` field.

pub mod api;

use std::time::Duration;

use ghshare_core::constants::APP_NAME;
use ghshare_core::Settings;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Message used when a failed response carries no `message` of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "GitHub API Error";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: token {token}`
    Token(String),
}

/// HTTP client errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to create HTTP client: {0}")]
    Config(String),
}

impl ApiError {
    /// The message to show a user: the API's own text for status errors.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// HTTP client for the GitHub API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl ApiClient {
    /// Create an unauthenticated client. `timeout` of `None` keeps the transport defaults.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let mut builder = Client::builder()
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    /// Create a client from runtime settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(&settings.api_url, settings.http_timeout())
    }

    /// Same connection pool, different credentials.
    pub fn with_auth(&self, auth: Auth) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            auth: Some(auth),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(Auth::Token(token)) => request.header("Authorization", format!("token {}", token)),
            None => request,
        }
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(path);
        let mut request = self.apply_auth(self.client.get(&url));

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        Self::decode_response(response).await
    }

    /// PUT JSON body. Any 2xx status is success; the response body is
    /// returned only when it decodes as `T`.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.put(&url).json(body));

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str(&text) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::debug!(
                    status = status.as_u16(),
                    error = %e,
                    "Ignoring undecodable success body"
                );
                Ok(None)
            }
        }
    }

    async fn decode_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        tracing::debug!(status, message = %message, "API request failed");

        ApiError::Status { status, message }
    }
}

/// Pull the `message` field out of a GitHub error body.
fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// Re-export domain response types for convenience.
pub use api::{CommitInfo, ContentInfo, ContentsResponse, RepositoryInfo};
