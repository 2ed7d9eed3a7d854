//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::landuse::LanduseType;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Grid geometry and type assignment
    pub grid: GridSettings,
    /// External land-use source
    pub overpass: OverpassSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// `[type:<Name>]` sections in file order; empty means the built-in table
    pub types: Vec<LanduseType>,
}

/// Grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Origin longitude in degrees
    pub longitude: f64,
    /// Origin latitude in degrees
    pub latitude: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Projection identifier, e.g. "EPSG:3857" or a PROJ string
    pub projection: String,
    /// Cell edge length in meters
    pub cell_size: f64,
    pub rows: usize,
    pub columns: usize,
    /// Classify cells from OpenStreetMap
    pub use_osm: bool,
    /// Seed for random type assignment
    pub seed: Option<u64>,
}

/// Overpass configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassSettings {
    /// Interpreter URL
    pub endpoint: String,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout: Option<u64>,
    /// Nearest-centroid fallback radius in meters (0 disables)
    pub nearest_fallback: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
