//! HTTP client for the investors API.
//!
//! `GET {base}/investors` lists investors and `GET {base}/investors/{id}`
//! returns one investor with their commitments.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use investor_dashboard_core::errors::{Error, Result, TransportError};
use investor_dashboard_core::{InvestorDataSourceTrait, InvestorDetail, InvestorSummary};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the investors API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Longest slice of an unparseable error body kept in the error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Error payload. The API reports failures as `{"detail": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiErrorResponse {
    fn into_message(self) -> Option<String> {
        let detail = self.detail.map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        detail.or(self.message).or(self.error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Investors API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the investors API.
///
/// # Example
///
/// ```ignore
/// let client = InvestorApiClient::new("http://127.0.0.1:8000/api", Duration::from_secs(30))?;
/// let investors = client.list_investors().await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvestorApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl InvestorApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be
    /// initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::InvalidConfigValue(
                "API base URL must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(Self::headers())
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Create a client for [`DEFAULT_API_URL`] with the default timeout.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("[InvestorsApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Connection(format!("Failed to read response: {}", e)))?;

        decode_response(status, &body)
    }
}

/// Turns a status and body into a typed value or an error.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(ApiErrorResponse::into_message)
            .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY_CHARS).collect());
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))
}

#[async_trait]
impl InvestorDataSourceTrait for InvestorApiClient {
    async fn list_investors(&self) -> Result<Vec<InvestorSummary>> {
        self.get("/investors").await
    }

    async fn get_investor_detail(&self, investor_id: i64) -> Result<InvestorDetail> {
        self.get(&format!("/investors/{}", investor_id)).await
    }
}
