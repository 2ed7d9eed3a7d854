//! Overpass fetcher.

use thiserror::Error;
use tracing::{debug, info, instrument};

use super::query::BoundingBox;
use super::response::OverpassResponse;
use crate::config::OverpassConfig;
use crate::http::{AsyncHttpClient, HttpError};

/// Errors from fetching external land-use data.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Endpoint is not a valid URL
    #[error("Invalid Overpass endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Transport failure or non-2xx status
    #[error("Overpass request failed: {0}")]
    Http(#[from] HttpError),

    /// Body was not valid Overpass JSON
    #[error("Malformed Overpass response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Issues bounding-box queries against an Overpass endpoint.
///
/// Exactly one request is made per [`fetch`](Self::fetch) call; there is
/// no retry.
pub struct OverpassClient<C: AsyncHttpClient> {
    http: C,
    config: OverpassConfig,
}

impl<C: AsyncHttpClient> OverpassClient<C> {
    pub fn new(http: C, config: OverpassConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &OverpassConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    /// Builds the GET URL with `data` and `bbox` query parameters.
    pub fn request_url(&self, query: &str, bbox: &BoundingBox) -> Result<String, OverpassError> {
        let bbox = bbox.to_string();
        let url = reqwest::Url::parse_with_params(
            self.config.endpoint(),
            &[("data", query), ("bbox", bbox.as_str())],
        )
        .map_err(|e| OverpassError::InvalidEndpoint {
            endpoint: self.config.endpoint().to_string(),
            reason: e.to_string(),
        })?;
        Ok(url.into())
    }

    /// Runs `query` restricted to `bbox` and parses the response.
    #[instrument(skip(self, query, bbox), fields(endpoint = %self.config.endpoint(), bbox = %bbox))]
    pub async fn fetch(
        &self,
        query: &str,
        bbox: &BoundingBox,
    ) -> Result<OverpassResponse, OverpassError> {
        let url = self.request_url(query, bbox)?;
        debug!(url_len = url.len(), "Querying Overpass");

        let body = self.http.get(&url).await?;
        let response = OverpassResponse::from_slice(&body)?;

        info!(
            bytes = body.len(),
            elements = response.elements.len(),
            "Overpass response parsed"
        );
        Ok(response)
    }
}
