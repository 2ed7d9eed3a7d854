//! Grid generation entry point.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use super::enrich::{enrich, index_response, EnrichmentStats};
use super::error::GridError;
use super::geometry::build_layout;
use super::types::{GridCell, GridFeatureCollection, GridParameters};
use crate::config::{JoinConfig, OverpassConfig};
use crate::http::{AsyncHttpClient, AsyncReqwestClient};
use crate::landuse::{LanduseType, TypesTable};
use crate::overpass::{landuse_query, BoundingBox, OverpassClient, OverpassError, OverpassResponse};
use crate::projection::PlanarProjection;

/// Generates rotated land-use grids.
///
/// Without external land use every cell draws a type uniformly at random
/// from the table. With it, cells start at the default type and are then
/// classified from a single Overpass query covering the grid's bounding box.
pub struct GridCreator<C: AsyncHttpClient> {
    overpass: OverpassClient<C>,
    join: JoinConfig,
    seed: Option<u64>,
}

impl GridCreator<AsyncReqwestClient> {
    /// Creates a generator backed by a reqwest client.
    pub fn from_config(overpass: OverpassConfig) -> Result<Self, GridError> {
        let http = match overpass.timeout_secs() {
            Some(secs) => AsyncReqwestClient::with_timeout(secs),
            None => AsyncReqwestClient::new(),
        }
        .map_err(OverpassError::from)?;
        Ok(Self::new(http, overpass))
    }
}

impl<C: AsyncHttpClient> GridCreator<C> {
    pub fn new(http: C, overpass: OverpassConfig) -> Self {
        Self {
            overpass: OverpassClient::new(http, overpass),
            join: JoinConfig::default(),
            seed: None,
        }
    }

    pub fn with_join_config(mut self, join: JoinConfig) -> Self {
        self.join = join;
        self
    }

    /// Seeds random type assignment for reproducible output.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn join_config(&self) -> JoinConfig {
        self.join
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates the grid described by `params`.
    ///
    /// Fetches external land use when `params.use_external_landuse` is set.
    #[instrument(skip_all, fields(rows = params.row_count, columns = params.column_count))]
    pub async fn generate(
        &self,
        params: &GridParameters,
        types: &TypesTable,
    ) -> Result<GridFeatureCollection, GridError> {
        if !params.use_external_landuse {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let grid = self.build(params, |_| types.choose(&mut rng))?;
            info!(cells = grid.len(), "Grid generated with random land use");
            return Ok(grid);
        }

        let mut grid = self.build(params, |_| types.default_type())?;
        let bbox = query_bbox(&grid)?;
        let response = self.overpass.fetch(&landuse_query(), &bbox).await?;
        enrich(&mut grid, &index_response(&response), types, self.join)?;
        Ok(grid)
    }

    /// Generates the grid and classifies it from an already-fetched response.
    ///
    /// Ignores `params.use_external_landuse`; no request is made.
    pub fn generate_with_response(
        &self,
        params: &GridParameters,
        types: &TypesTable,
        response: &OverpassResponse,
    ) -> Result<(GridFeatureCollection, EnrichmentStats), GridError> {
        let mut grid = self.build(params, |_| types.default_type())?;
        let stats = enrich(&mut grid, &index_response(response), types, self.join)?;
        Ok((grid, stats))
    }

    fn build<'t>(
        &self,
        params: &GridParameters,
        mut pick: impl FnMut(usize) -> &'t LanduseType,
    ) -> Result<GridFeatureCollection, GridError> {
        params.validate()?;
        let projection = PlanarProjection::from_id(&params.projection_id)?;
        let layout = build_layout(params, &projection)?;

        let cells = layout
            .rings
            .into_iter()
            .enumerate()
            .map(|(i, ring)| GridCell::new(ring, i, params.column_count, pick(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GridFeatureCollection::new(cells))
    }
}

/// Bounding box for the Overpass query.
///
/// A successful layout always yields at least one cell, so `EmptyGrid` only
/// surfaces for a collection built some other way.
fn query_bbox(grid: &GridFeatureCollection) -> Result<BoundingBox, GridError> {
    grid.bbox().ok_or(GridError::EmptyGrid)
}

#[cfg(test)]
impl GridCreator<crate::http::tests::MockAsyncHttpClient> {
    pub(crate) fn overpass_requests(&self) -> usize {
        self.overpass.http().request_count()
    }

    pub(crate) fn last_overpass_url(&self) -> Option<String> {
        self.overpass.http().last_url()
    }
}

/// Generates a grid with the default Overpass settings.
///
/// `types` is validated first; it must contain a "Residential" entry.
pub async fn generate_grid(
    params: &GridParameters,
    types: &[LanduseType],
) -> Result<GridFeatureCollection, GridError> {
    let table = TypesTable::new(types.to_vec())?;
    GridCreator::from_config(OverpassConfig::default())?
        .generate(params, &table)
        .await
}
