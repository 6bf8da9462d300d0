use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::retry::retry_linear;
use crate::types::{BuffetPriceRequest, BuffetPriceResponse};

const DEFAULT_BASE_URL: &str = "https://www.barbequenation.com";

/// Path of the pricing endpoint, relative to the base URL.
const PRICING_ENDPOINT: &str = "api/v1/menu-buffet-price";

/// HTTP client for the chain's buffet pricing endpoint.
///
/// Wraps `reqwest` with the fixed request headers the endpoint expects
/// (JSON content type, a browser-like user agent) and a bounded linear-backoff
/// retry policy for transient failures. Use [`BuffetClient::new`] for
/// production or [`BuffetClient::with_base_url`] to point at a mock server
/// in tests.
pub struct BuffetClient {
    client: Client,
    endpoint: Url,
    /// Total number of POST attempts per call, including the first.
    max_attempts: u32,
    /// Base delay for linear backoff: the sleep after the n-th failed
    /// attempt is `backoff_base_ms * n`.
    backoff_base_ms: u64,
}

impl BuffetClient {
    /// Creates a new client pointed at the production pricing API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        Self::with_base_url(
            timeout_secs,
            user_agent,
            max_attempts,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        max_attempts: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Self::pricing_endpoint(base_url)?;

        Ok(Self {
            client,
            endpoint,
            max_attempts,
            backoff_base_ms,
        })
    }

    /// Fetches buffet pricing for one (branch, date, slot) combination.
    ///
    /// POSTs `payload` as JSON to the pricing endpoint, retrying transient
    /// failures (network errors, non-200 statuses) up to the configured
    /// attempt budget with linear backoff. An HTTP 200 is parsed and returned
    /// immediately; this call never partially succeeds.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] — network or TLS failure after all attempts.
    /// - [`ClientError::UnexpectedStatus`] — non-200 status after all attempts.
    /// - [`ClientError::Deserialize`] — 200 whose body is not valid JSON or
    ///   does not match the expected shape (not retried).
    pub async fn fetch_buffet_prices(
        &self,
        payload: &BuffetPriceRequest,
    ) -> Result<BuffetPriceResponse, ClientError> {
        retry_linear(self.max_attempts, self.backoff_base_ms, || async move {
            let response = self
                .client
                .post(self.endpoint.clone())
                .json(payload)
                .send()
                .await?;
            let status = response.status();

            if status != reqwest::StatusCode::OK {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    branch_id: payload.branch_id.clone(),
                    slot_time: payload.reservation_time.clone(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<BuffetPriceResponse>(&body).map_err(|e| {
                ClientError::Deserialize {
                    context: format!(
                        "buffet prices for branch {} at {}",
                        payload.branch_id, payload.reservation_time
                    ),
                    source: e,
                }
            })
        })
        .await
    }

    /// Resolves the pricing endpoint URL against `base_url`.
    ///
    /// The base is normalised to end with exactly one slash so `Url::join`
    /// appends the endpoint path instead of replacing the last path segment.
    fn pricing_endpoint(base_url: &str) -> Result<Url, ClientError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        base.join(PRICING_ENDPOINT)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
