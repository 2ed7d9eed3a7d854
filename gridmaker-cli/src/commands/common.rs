//! Common utilities shared across CLI commands.

use std::path::Path;

use gridmaker::overpass::OverpassResponse;

use crate::error::CliError;

/// Reads and parses a saved Overpass JSON response.
pub fn read_overpass_file(path: &Path) -> Result<OverpassResponse, CliError> {
    let body = std::fs::read(path).map_err(|error| CliError::FileRead {
        path: path.to_path_buf(),
        error,
    })?;
    OverpassResponse::from_slice(&body).map_err(|error| CliError::ParseInput {
        path: path.to_path_buf(),
        error,
    })
}
