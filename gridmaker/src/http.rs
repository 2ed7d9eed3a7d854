//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Request never produced a response (DNS, connect, TLS, timeout)
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body could not be read
    #[error("Failed to read response from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Trait for asynchronous HTTP client operations.
///
/// Allows the Overpass fetcher to be exercised against mock clients.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request and returns the response body.
    ///
    /// Non-2xx responses are reported as [`HttpError::Status`].
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// User-Agent sent with every request. Overpass asks clients to identify themselves.
const USER_AGENT: &str = concat!("gridmaker/", env!("CARGO_PKG_VERSION"));

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client without a request timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::build(None)
    }

    /// Creates a client with a total request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        Self::build(Some(Duration::from_secs(timeout_secs)))
    }

    fn build(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(HttpError::Request {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(HttpError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(HttpError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
