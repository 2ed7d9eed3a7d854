//! Land-use enrichment of generated cells.

use geo::Point;
use tracing::{debug, info};

use super::error::GridError;
use super::types::GridFeatureCollection;
use crate::config::JoinConfig;
use crate::join::{ClassifiedPolygon, JoinMatch, SpatialIndex};
use crate::landuse::TypesTable;
use crate::overpass::{to_features, OverpassResponse};

/// Per-cell outcome counts of an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Cells whose centroid fell inside an external polygon
    pub contained: usize,
    /// Cells resolved by the nearest-centroid fallback
    pub nearest: usize,
    /// Cells left at the default type
    pub defaulted: usize,
}

/// Builds the spatial index for an Overpass response.
pub fn index_response(response: &OverpassResponse) -> SpatialIndex {
    let features = to_features(&response.elements);
    SpatialIndex::new(ClassifiedPolygon::classify_all(features))
}

/// Reassigns every cell's type from the polygon its centroid falls in.
///
/// Cells with no match get the table's default type. Every cell's sequence
/// index is rewritten to its position, so running this twice over the same
/// inputs yields the same collection.
pub fn enrich(
    grid: &mut GridFeatureCollection,
    index: &SpatialIndex,
    types: &TypesTable,
    config: JoinConfig,
) -> Result<EnrichmentStats, GridError> {
    let mut stats = EnrichmentStats::default();

    for (position, cell) in grid.cells_mut().iter_mut().enumerate() {
        let c = cell.centroid();
        let matched = index.resolve(Point::new(c.lon, c.lat), config.nearest_fallback_m());

        let landuse = match matched.index().and_then(|i| index.get(i)) {
            Some(polygon) => {
                let name = polygon.category.name();
                debug!(
                    cell = position,
                    feature = %polygon.feature.id,
                    category = name,
                    "Cell matched"
                );
                types.get(name).ok_or_else(|| GridError::UnknownType {
                    name: name.to_string(),
                })?
            }
            None => types.default_type(),
        };

        match matched {
            JoinMatch::Contained(_) => stats.contained += 1,
            JoinMatch::Nearest(_) => stats.nearest += 1,
            JoinMatch::Unmatched => stats.defaulted += 1,
        }

        cell.assign(landuse, position)?;
    }

    info!(
        features = index.len(),
        contained = stats.contained,
        nearest = stats.nearest,
        defaulted = stats.defaulted,
        "Grid enriched with external land use"
    );
    Ok(stats)
}
