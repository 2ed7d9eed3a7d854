//! Planar projection adapter.
//!
//! Wraps `proj4rs` so the grid builder can lay out cells in meters and map
//! them back to longitude/latitude. Geographic input and output are in
//! degrees; proj4rs itself works in radians for angular coordinates.

mod definitions;

pub use definitions::resolve;

use std::fmt;

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use thiserror::Error;
use tracing::debug;

use crate::coord::GeoPoint;

/// Errors raised by the projection adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Identifier is not a supported EPSG code or PROJ.4 string
    #[error("Unsupported projection identifier: '{0}'")]
    UnknownCrs(String),

    /// PROJ.4 definition could not be parsed
    #[error("Invalid projection definition '{definition}': {reason}")]
    InvalidDefinition { definition: String, reason: String },

    /// Projection produces angular coordinates and cannot space cells in meters
    #[error("Projection '{0}' is geographic; a planar projection is required")]
    NotPlanar(String),

    /// Transformation failed or produced non-finite output
    #[error("Coordinate transformation failed for ({x}, {y}): {reason}")]
    Transform { x: f64, y: f64, reason: String },
}

/// A bidirectional lon/lat ↔ planar transformation.
pub struct PlanarProjection {
    id: String,
    geographic: Proj,
    planar: Proj,
}

impl PlanarProjection {
    /// Builds the adapter for a projection identifier such as `EPSG:3857`.
    pub fn from_id(id: &str) -> Result<Self, ProjectionError> {
        let definition = definitions::resolve(id)?;
        if definitions::is_geographic(&definition) {
            return Err(ProjectionError::NotPlanar(id.to_string()));
        }
        let base = definitions::geographic_base(&definition);

        let planar = parse(&definition)?;
        let geographic = parse(&base)?;

        debug!(id = id, definition = %definition, base = %base, "Projection resolved");

        Ok(Self {
            id: id.to_string(),
            geographic,
            planar,
        })
    }

    /// The identifier this projection was built from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Projects a geographic point to planar `(x, y)`.
    pub fn project(&self, point: GeoPoint) -> Result<(f64, f64), ProjectionError> {
        let mut xyz = (point.lon.to_radians(), point.lat.to_radians(), 0.0);
        transform(&self.geographic, &self.planar, &mut xyz).map_err(|e| {
            ProjectionError::Transform {
                x: point.lon,
                y: point.lat,
                reason: e.to_string(),
            }
        })?;
        finite(point.lon, point.lat, (xyz.0, xyz.1))
    }

    /// Maps planar `(x, y)` back to a geographic point.
    pub fn unproject(&self, x: f64, y: f64) -> Result<GeoPoint, ProjectionError> {
        let mut xyz = (x, y, 0.0);
        transform(&self.planar, &self.geographic, &mut xyz).map_err(|e| {
            ProjectionError::Transform {
                x,
                y,
                reason: e.to_string(),
            }
        })?;
        let (lon, lat) = finite(x, y, (xyz.0.to_degrees(), xyz.1.to_degrees()))?;
        Ok(GeoPoint { lon, lat })
    }
}

impl fmt::Debug for PlanarProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanarProjection")
            .field("id", &self.id)
            .finish()
    }
}

fn parse(definition: &str) -> Result<Proj, ProjectionError> {
    Proj::from_proj_string(definition).map_err(|e| ProjectionError::InvalidDefinition {
        definition: definition.to_string(),
        reason: e.to_string(),
    })
}

fn finite(x: f64, y: f64, out: (f64, f64)) -> Result<(f64, f64), ProjectionError> {
    if out.0.is_finite() && out.1.is_finite() {
        Ok(out)
    } else {
        Err(ProjectionError::Transform {
            x,
            y,
            reason: "result is not finite".to_string(),
        })
    }
}
