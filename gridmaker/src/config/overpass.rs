//! Overpass fetch configuration.

use super::defaults::DEFAULT_OVERPASS_ENDPOINT;

/// Configuration for the external land-use query.
///
/// # Example
///
/// ```
/// use gridmaker::config::OverpassConfig;
///
/// let config = OverpassConfig::default();
/// assert_eq!(config.endpoint(), "https://overpass-api.de/api/interpreter");
/// assert_eq!(config.timeout_secs(), None);
///
/// let config = OverpassConfig::new()
///     .with_endpoint("https://overpass.kumi.systems/api/interpreter")
///     .with_timeout_secs(Some(180));
/// assert_eq!(config.timeout_secs(), Some(180));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassConfig {
    /// Interpreter URL the query is sent to
    endpoint: String,
    /// Client-side request timeout; `None` waits for the server indefinitely
    timeout_secs: Option<u64>,
}

impl OverpassConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interpreter endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the client-side timeout. Default: none.
    pub fn with_timeout_secs(mut self, timeout: Option<u64>) -> Self {
        self.timeout_secs = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}
