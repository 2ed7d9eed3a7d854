//! Grid parameter, cell and collection types.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use super::error::GridError;
use crate::config::{
    DEFAULT_CELL_SIZE_M, DEFAULT_COLUMNS, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_PROJECTION,
    DEFAULT_ROTATION_DEG, DEFAULT_ROWS,
};
use crate::coord::{GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::landuse::{LanduseType, TypesError};
use crate::overpass::BoundingBox;

/// Input describing the grid to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParameters {
    /// Longitude of the top-left corner, degrees
    pub origin_longitude: f64,
    /// Latitude of the top-left corner, degrees
    pub origin_latitude: f64,
    /// Rotation of the row axis from east, degrees; the row axis follows the
    /// compass bearing `90 - rotation`
    pub rotation_degrees: f64,
    /// Planar projection used for metric spacing, e.g. `EPSG:3857`
    pub projection_id: String,
    /// Cell edge length in meters
    pub cell_size_m: f64,
    pub row_count: usize,
    pub column_count: usize,
    /// Derive cell types from OpenStreetMap instead of drawing at random
    pub use_external_landuse: bool,
}

impl GridParameters {
    /// Checks that every numeric field is finite and in range.
    ///
    /// Column count is not checked against the two-column minimum here; that
    /// is reported separately as [`GridError::DegenerateGrid`].
    pub fn validate(&self) -> Result<(), GridError> {
        let lon = self.origin_longitude;
        if !lon.is_finite() || !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(GridError::invalid(
                "longitude",
                lon,
                "must be a number between -180 and 180",
            ));
        }
        let lat = self.origin_latitude;
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(GridError::invalid(
                "latitude",
                lat,
                "must be a number between -90 and 90",
            ));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(GridError::invalid(
                "rotation",
                self.rotation_degrees,
                "must be a finite number",
            ));
        }
        if !self.cell_size_m.is_finite() || self.cell_size_m <= 0.0 {
            return Err(GridError::invalid(
                "cell_size",
                self.cell_size_m,
                "must be greater than zero",
            ));
        }
        if self.row_count == 0 {
            return Err(GridError::invalid("rows", 0, "must be at least 1"));
        }
        if self.column_count == 0 {
            return Err(GridError::invalid("columns", 0, "must be at least 1"));
        }
        if self.projection_id.trim().is_empty() {
            return Err(GridError::invalid("projection", "", "must not be empty"));
        }
        Ok(())
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count * self.column_count
    }

    pub fn origin(&self) -> GeoPoint {
        GeoPoint {
            lon: self.origin_longitude,
            lat: self.origin_latitude,
        }
    }
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            origin_longitude: DEFAULT_LONGITUDE,
            origin_latitude: DEFAULT_LATITUDE,
            rotation_degrees: DEFAULT_ROTATION_DEG,
            projection_id: DEFAULT_PROJECTION.to_string(),
            cell_size_m: DEFAULT_CELL_SIZE_M,
            row_count: DEFAULT_ROWS,
            column_count: DEFAULT_COLUMNS,
            use_external_landuse: false,
        }
    }
}

/// One rectangular cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Closed ring: five points, first equals last
    pub ring: [GeoPoint; 5],
    pub row: usize,
    pub column: usize,
    /// Position in row-major order
    pub sequence_index: usize,
    pub landuse: LanduseType,
    /// `landuse.color` as `[r, g, b]`
    pub color: [u8; 3],
}

impl GridCell {
    pub(crate) fn new(
        ring: [GeoPoint; 5],
        sequence_index: usize,
        column_count: usize,
        landuse: &LanduseType,
    ) -> Result<Self, TypesError> {
        Ok(Self {
            ring,
            row: sequence_index / column_count,
            column: sequence_index % column_count,
            sequence_index,
            color: landuse.rgb()?,
            landuse: landuse.clone(),
        })
    }

    /// Overwrites the type attributes and the sequence index.
    pub(crate) fn assign(
        &mut self,
        landuse: &LanduseType,
        sequence_index: usize,
    ) -> Result<(), TypesError> {
        self.color = landuse.rgb()?;
        self.landuse = landuse.clone();
        self.sequence_index = sequence_index;
        Ok(())
    }

    /// Vertex average of the four distinct corners.
    pub fn centroid(&self) -> GeoPoint {
        let (lon, lat) = self.ring[..4]
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.lon, y + p.lat));
        GeoPoint {
            lon: lon / 4.0,
            lat: lat / 4.0,
        }
    }

    /// The cell as a GeoJSON polygon feature with flat properties.
    pub fn to_feature(&self) -> Feature {
        let ring: Vec<Vec<f64>> = self.ring.iter().map(|p| p.to_position()).collect();
        let mut properties = JsonObject::new();
        properties.insert("color".to_string(), json!(self.color));
        properties.insert("height".to_string(), json!(self.landuse.height));
        properties.insert("name".to_string(), json!(self.landuse.name));
        properties.insert("interactive".to_string(), json!(self.landuse.interactive));
        properties.insert("id".to_string(), json!(self.sequence_index));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// The generated grid, cells in row-major order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridFeatureCollection {
    cells: Vec<GridCell>,
}

impl GridFeatureCollection {
    pub(crate) fn new(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [GridCell] {
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }

    /// Bounding box over every ring vertex.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.cells.iter().flat_map(|c| c.ring))
    }

    pub fn to_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.cells.iter().map(GridCell::to_feature).collect(),
            foreign_members: None,
        }
    }

    /// Serializes the GeoJSON feature collection.
    pub fn to_geojson_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_geojson())
    }
}
