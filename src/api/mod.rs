//! Flowest backend client
//!
//! Thin REST client over reqwest: one request, one response, no retries.
//! Requests carry the configured bearer token; a 401 means the session is
//! gone and the user has to log in again.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;

pub mod simulators;
pub mod tickers;

pub use tickers::{find_exact, Ticker};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("session expired or invalid token; log in again and update FLOWEST_TOKEN")]
    Unauthorized,

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(String),

    #[error("request failed")]
    Transport(#[from] reqwest::Error),
}

/// Error body the backend sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
}

pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        // A trailing slash makes `Url::join` append instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .user_agent(concat!("flowest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No API url configured. Set FLOWEST_API_URL or [api].base_url in the config file"
            )
        })?;
        Ok(Self::new(base_url, config.token.clone())?)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute url for `path` (relative to the base url) with query pairs
    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        check_status(builder.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Pull the backend's `message` out of an error body. NestJS-style
/// validation errors send an array of messages.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .and_then(|m| match m {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|i| i.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .filter(|m| !m.is_empty());

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    })
}
