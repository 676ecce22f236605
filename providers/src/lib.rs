//! HTTP clients for the notebook's remote text services.
//!
//! Two collaborators, both specified only at their interface boundary:
//!
//! - `POST /stats` with `{"text": ...}` returns `{"word_count": n}` and is
//!   used to refresh a cell's word count after an edit.
//! - `POST /run` with `{"text": ...}` returns `{"result": ...}` and
//!   evaluates the cell's text.
//!
//! [`NotebookService`] wraps both endpoints behind typed methods. Failures
//! are reported through [`ServiceError`]; nothing is retried here - how a
//! failure surfaces (logged, or shown as a fixed run-failure message) is
//! the engine's decision, not the transport's.

use std::env;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default service address used by local deployments.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the service base URL.
pub const SERVICE_URL_ENV: &str = "QUILL_SERVICE_URL";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where the word-count and run services live.
///
/// Addresses are deployment configuration, not part of the core contract.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Default configuration with `QUILL_SERVICE_URL` honored when set.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(SERVICE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

/// Failure talking to a notebook service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned {status}")]
    Status { status: StatusCode },
    /// The response body could not be decoded.
    #[error("malformed response body: {0}")]
    Body(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct StatsResponse {
    word_count: u32,
}

#[derive(Deserialize)]
struct RunResponse {
    result: String,
}

/// Client for the word-count and run endpoints.
#[derive(Debug, Clone)]
pub struct NotebookService {
    client: reqwest::Client,
    base_url: String,
}

impl NotebookService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ServiceError::Transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Count the words in `text` via `POST /stats`.
    pub async fn word_count(&self, text: &str) -> Result<u32, ServiceError> {
        let response: StatsResponse = self.post("stats", text).await?;
        Ok(response.word_count)
    }

    /// Evaluate `text` via `POST /run` and return the service's result.
    pub async fn run(&self, text: &str) -> Result<String, ServiceError> {
        let response: RunResponse = self.post("run", text).await?;
        Ok(response.result)
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        text: &str,
    ) -> Result<T, ServiceError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TextPayload { text })
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "notebook service returned an error status");
            return Err(ServiceError::Status { status });
        }

        response.json().await.map_err(ServiceError::Body)
    }
}
