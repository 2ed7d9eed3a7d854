//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use gridmaker::config::ConfigFileError;
use gridmaker::grid::GridError;
use gridmaker::landuse::TypesError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Configured types table is invalid
    Types(TypesError),
    /// Grid generation failed
    Grid(GridError),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: std::io::Error },
    /// Input file is not an Overpass JSON response
    ParseInput {
        path: PathBuf,
        error: serde_json::Error,
    },
    /// Failed to serialize GeoJSON
    Serialize(serde_json::Error),
    /// Failed to write output file
    FileWrite { path: PathBuf, error: std::io::Error },
    /// Failed to start the async runtime
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Grid(GridError::ExternalFetch(_)) => {
                eprintln!();
                eprintln!("The Overpass API could not be queried. Common issues:");
                eprintln!("  1. Rate limited: wait a minute and try again");
                eprintln!("  2. Large grid: reduce rows/columns or cell size");
                eprintln!("  3. Offline: save a response and pass it with --osm-file");
            }
            CliError::Grid(GridError::Projection(_)) => {
                eprintln!();
                eprintln!(
                    "Supported projections: EPSG:3857, EPSG:3395, EPSG:26986, \
                     EPSG:32601-32660, EPSG:32701-32760, or a PROJ string starting with '+'"
                );
            }
            CliError::Types(_) | CliError::Grid(GridError::UnknownType { .. }) => {
                eprintln!();
                eprintln!("Check the [type:<Name>] sections in your config file.");
                eprintln!("Remove them all to use the built-in CityScope table.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Types(e) => write!(f, "Configuration error: {}", e),
            CliError::Grid(e) => write!(f, "Grid generation failed: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path.display(), error)
            }
            CliError::ParseInput { path, error } => write!(
                f,
                "File '{}' is not an Overpass JSON response: {}",
                path.display(),
                error
            ),
            CliError::Serialize(e) => write!(f, "Failed to serialize GeoJSON: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Types(e) => Some(e),
            CliError::Grid(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::ParseInput { error, .. } => Some(error),
            CliError::Serialize(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Runtime(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        CliError::Grid(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<TypesError> for CliError {
    fn from(e: TypesError) -> Self {
        CliError::Types(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_path() {
        let err = CliError::FileRead {
            path: PathBuf::from("/tmp/missing.json"),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read file '/tmp/missing.json': not found"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_grid_error() {
        let err: CliError = GridError::DegenerateGrid { columns: 1 }.into();
        assert!(err.to_string().starts_with("Grid generation failed: Degenerate grid"));
    }
}
