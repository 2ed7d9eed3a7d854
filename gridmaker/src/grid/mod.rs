//! Rotated land-use grid generation.
//!
//! [`GridCreator`] turns [`GridParameters`] and a [`TypesTable`] into a
//! [`GridFeatureCollection`] of square cells in row-major order. Cell types
//! are either drawn at random or derived from OpenStreetMap land use via
//! the [`join`](crate::join) module.
//!
//! [`TypesTable`]: crate::landuse::TypesTable

mod creator;
mod enrich;
mod error;
mod geometry;
mod types;

pub use creator::{generate_grid, GridCreator};
pub use enrich::{enrich, index_response, EnrichmentStats};
pub use error::GridError;
pub use geometry::{build_layout, GridLayout};
pub use types::{GridCell, GridFeatureCollection, GridParameters};
