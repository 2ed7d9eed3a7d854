//! Spatial join configuration.

use super::defaults::DEFAULT_NEAREST_FALLBACK_M;

/// Configuration for assigning external polygons to grid cells.
///
/// Containment is always tried first. When `nearest_fallback_m` is greater
/// than zero, a cell whose centroid lies in no polygon takes the polygon
/// whose centroid is nearest within that many meters.
///
/// The default radius is zero, so out of the box the join is
/// containment-only: a centroid outside every polygon gets the default
/// type, the same result the CityScope tagging step produced. Distance to a
/// polygon's centroid says little about cells near the edge of a large park
/// or campus, so the fallback is opt-in through `[overpass] nearest_fallback`
/// or `--nearest-fallback`.
///
/// # Example
///
/// ```
/// use gridmaker::config::JoinConfig;
///
/// let config = JoinConfig::default();
/// assert!(!config.has_nearest_fallback());
///
/// let config = JoinConfig::new().with_nearest_fallback_m(25.0);
/// assert!(config.has_nearest_fallback());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinConfig {
    nearest_fallback_m: f64,
}

impl JoinConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nearest-centroid fallback radius in meters. Zero disables it.
    pub fn with_nearest_fallback_m(mut self, meters: f64) -> Self {
        self.nearest_fallback_m = if meters.is_finite() { meters.max(0.0) } else { 0.0 };
        self
    }

    pub fn nearest_fallback_m(&self) -> f64 {
        self.nearest_fallback_m
    }

    pub fn has_nearest_fallback(&self) -> bool {
        self.nearest_fallback_m > 0.0
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            nearest_fallback_m: DEFAULT_NEAREST_FALLBACK_M,
        }
    }
}
