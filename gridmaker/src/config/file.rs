//! Configuration file handling for ~/.gridmaker/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::join::JoinConfig;
use super::overpass::OverpassConfig;
use super::settings::ConfigFile;
use crate::grid::GridParameters;
use crate::landuse::{TypesError, TypesTable};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.gridmaker/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.gridmaker/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        std::fs::write(path, self.to_ini_string())
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// The commented INI text that [`save_to`](Self::save_to) writes.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }

    /// Grid parameters from the `[grid]` section.
    pub fn grid_parameters(&self) -> GridParameters {
        GridParameters {
            origin_longitude: self.grid.longitude,
            origin_latitude: self.grid.latitude,
            rotation_degrees: self.grid.rotation,
            projection_id: self.grid.projection.clone(),
            cell_size_m: self.grid.cell_size,
            row_count: self.grid.rows,
            column_count: self.grid.columns,
            use_external_landuse: self.grid.use_osm,
        }
    }

    pub fn overpass_config(&self) -> OverpassConfig {
        OverpassConfig::new()
            .with_endpoint(self.overpass.endpoint.clone())
            .with_timeout_secs(self.overpass.timeout)
    }

    pub fn join_config(&self) -> JoinConfig {
        JoinConfig::new().with_nearest_fallback_m(self.overpass.nearest_fallback)
    }

    /// The configured types table, or the built-in one when none is configured.
    pub fn types_table(&self) -> Result<TypesTable, TypesError> {
        if self.types.is_empty() {
            Ok(TypesTable::cityscope())
        } else {
            TypesTable::new(self.types.clone())
        }
    }
}

/// Get the path to the config directory (~/.gridmaker).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gridmaker")
}

/// Get the path to the config file (~/.gridmaker/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::landuse::LanduseType;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.grid.longitude, DEFAULT_LONGITUDE);
        assert_eq!(config.grid.projection, DEFAULT_PROJECTION);
        assert!(!config.grid.use_osm);
        assert!(config.grid.seed.is_none());
        assert_eq!(config.overpass.endpoint, DEFAULT_OVERPASS_ENDPOINT);
        assert!(config.overpass.timeout.is_none());
        assert!(config.logging.file.ends_with(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();
        assert!(config_path.exists());
    }

    #[test]
    fn test_runtime_conversions() {
        let mut config = ConfigFile::default();
        config.grid.rows = 3;
        config.grid.use_osm = true;
        config.overpass.timeout = Some(45);
        config.overpass.nearest_fallback = 20.0;

        let params = config.grid_parameters();
        assert_eq!(params.row_count, 3);
        assert!(params.use_external_landuse);
        assert!(params.validate().is_ok());

        assert_eq!(config.overpass_config().timeout_secs(), Some(45));
        assert_eq!(config.join_config().nearest_fallback_m(), 20.0);
    }

    #[test]
    fn test_types_table_defaults_to_builtin() {
        let config = ConfigFile::default();
        assert_eq!(config.types_table().unwrap(), TypesTable::cityscope());
    }

    #[test]
    fn test_configured_types_are_validated() {
        let mut config = ConfigFile::default();
        config.types = vec![LanduseType::new("Park", "#4CAF50", 0.0, true)];
        assert_eq!(config.types_table(), Err(TypesError::MissingDefault));
    }
}
