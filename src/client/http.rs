//! HTTP Transport
//!
//! Async GET transport with bounded retry and exponential backoff.

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{Result, ScoreSaberError};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{trace, warn};

/// A decoded response: headers plus the untyped JSON body
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Performs one logical GET for a path relative to the API root
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<TransportResponse>;
}

/// reqwest-backed transport retrying network failures and 5xx responses
pub struct HttpTransport {
    /// Inner reqwest client
    client: Client,

    /// API root without trailing slash
    base_url: String,

    retry: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("scoresaber-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ScoreSaberError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            retry: config.retry.clone(),
        })
    }

    /// Full URL for a relative path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn backoff_policy(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.retry.initial_interval(),
            current_interval: self.retry.initial_interval(),
            max_interval: self.retry.max_interval(),
            max_elapsed_time: None,
            multiplier: 2.0,
            ..Default::default()
        }
    }

    /// Single attempt, no retry
    async fn send_once(&self, path: &str, url: &str) -> std::result::Result<TransportResponse, Failure> {
        let response = self.client.get(url).send().await.map_err(|e| Failure {
            retryable: is_retryable(&e),
            error: with_path(path, e.into()),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Failure {
                error: ScoreSaberError::transport(
                    path,
                    Some(status.as_u16()),
                    body.chars().take(500).collect::<String>(),
                ),
                retryable: status.is_server_error(),
            });
        }

        let headers = response.headers().clone();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Failure {
                error: ScoreSaberError::transport(
                    path,
                    Some(status.as_u16()),
                    format!("Invalid JSON body: {}", e),
                ),
                retryable: false,
            })?;

        Ok(TransportResponse { headers, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse> {
        let url = self.url_for(path);
        let url = url.as_str();
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let max_retries = self.retry.max_retries;

        backoff::future::retry(self.backoff_policy(), move || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            trace!(url, attempt, "GET");

            match self.send_once(path, url).await {
                Ok(response) => Ok(response),
                Err(Failure {
                    error,
                    retryable: true,
                }) if attempt <= max_retries => {
                    warn!(url, attempt, error = %error, "transient failure, retrying");
                    Err(backoff::Error::transient(error))
                }
                Err(failure) => Err(backoff::Error::permanent(failure.error)),
            }
        })
        .await
    }
}

/// A failed attempt and whether another attempt could succeed
struct Failure {
    error: ScoreSaberError,
    retryable: bool,
}

/// Connection, timeout and send failures; builder and redirect errors are final
fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request()
}

/// Replace the URL-derived path with the caller's relative path
fn with_path(path: &str, err: ScoreSaberError) -> ScoreSaberError {
    match err {
        ScoreSaberError::Transport {
            status, message, ..
        } => ScoreSaberError::transport(path, status, message),
        other => other,
    }
}
