//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;

// =============================================================================
// Grid defaults
// =============================================================================

/// Default origin longitude (Kendall Square, Cambridge MA).
pub const DEFAULT_LONGITUDE: f64 = -71.09;

/// Default origin latitude.
pub const DEFAULT_LATITUDE: f64 = 42.36;

pub const DEFAULT_ROTATION_DEG: f64 = 0.0;

/// Default planar projection (Web Mercator).
pub const DEFAULT_PROJECTION: &str = "EPSG:3857";

/// Default cell edge length in meters.
pub const DEFAULT_CELL_SIZE_M: f64 = 10.0;

pub const DEFAULT_ROWS: usize = 20;

pub const DEFAULT_COLUMNS: usize = 20;

// =============================================================================
// Overpass defaults
// =============================================================================

/// Public Overpass API interpreter.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Nearest-centroid fallback radius in meters (0 disables it).
pub const DEFAULT_NEAREST_FALLBACK_M: f64 = 0.0;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "gridmaker.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                longitude: DEFAULT_LONGITUDE,
                latitude: DEFAULT_LATITUDE,
                rotation: DEFAULT_ROTATION_DEG,
                projection: DEFAULT_PROJECTION.to_string(),
                cell_size: DEFAULT_CELL_SIZE_M,
                rows: DEFAULT_ROWS,
                columns: DEFAULT_COLUMNS,
                use_osm: false,
                seed: None,
            },
            overpass: OverpassSettings {
                endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
                timeout: None,
                nearest_fallback: DEFAULT_NEAREST_FALLBACK_M,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE),
            },
            types: Vec::new(),
        }
    }
}
