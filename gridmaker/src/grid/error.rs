//! Error taxonomy for grid generation.

use thiserror::Error;

use crate::landuse::TypesError;
use crate::overpass::OverpassError;
use crate::projection::ProjectionError;

/// Errors that can occur while generating a grid.
///
/// Every error is fatal for the generation call; no partial collection is
/// ever returned.
#[derive(Debug, Error)]
pub enum GridError {
    /// A grid parameter is non-finite or out of range
    #[error("Invalid grid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Projection identifier unsupported or transformation failed
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Fewer than two columns; the column step cannot be derived
    #[error("Degenerate grid: {columns} column(s), at least 2 are required")]
    DegenerateGrid { columns: usize },

    /// The grid has no cells, so no query bounding box exists
    #[error("Grid has no cells to bound")]
    EmptyGrid,

    /// Overpass request, status or JSON failure
    #[error("External land-use fetch failed: {0}")]
    ExternalFetch(#[from] OverpassError),

    /// The spatial join resolved a category absent from the types table
    #[error("Land-use type '{name}' is not in the types table")]
    UnknownType { name: String },

    /// Types table failed validation
    #[error("Invalid types table: {0}")]
    InvalidTypes(#[from] TypesError),
}

impl GridError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
