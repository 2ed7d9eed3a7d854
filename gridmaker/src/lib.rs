//! gridmaker - Rotated land-use grids for urban simulation tables
//!
//! This library generates a rotated rectangular grid of square cells over a
//! geographic origin and assigns each cell a land-use type, either at random
//! or from OpenStreetMap land use fetched through the Overpass API.
//!
//! # High-Level API
//!
//! For most use cases, [`grid::GridCreator`] is the entry point:
//!
//! ```ignore
//! use gridmaker::config::OverpassConfig;
//! use gridmaker::grid::{GridCreator, GridParameters};
//! use gridmaker::landuse::TypesTable;
//!
//! let creator = GridCreator::from_config(OverpassConfig::default())?;
//! let params = GridParameters {
//!     use_external_landuse: true,
//!     ..GridParameters::default()
//! };
//! let grid = creator.generate(&params, &TypesTable::cityscope()).await?;
//! println!("{}", grid.to_geojson_string()?);
//! ```

pub mod config;
pub mod coord;
pub mod grid;
pub mod http;
pub mod join;
pub mod landuse;
pub mod logging;
pub mod overpass;
pub mod projection;

/// Version of the gridmaker library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
