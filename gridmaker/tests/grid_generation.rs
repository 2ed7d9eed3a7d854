//! Integration tests for grid generation.
//!
//! These tests drive the public API end to end:
//! - Config file → parameters → grid
//! - Overpass fetch through a custom `AsyncHttpClient`
//! - Node buffers and multipolygon holes in the spatial join
//! - Rotated grids in a UTM projection

use std::sync::Mutex;

use gridmaker::config::{ConfigFile, JoinConfig, OverpassConfig};
use gridmaker::coord::GeoPoint;
use gridmaker::grid::{GridCreator, GridError, GridFeatureCollection, GridParameters};
use gridmaker::http::{AsyncHttpClient, HttpError};
use gridmaker::landuse::TypesTable;
use gridmaker::overpass::OverpassResponse;
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Serves one canned body and records requested URLs.
struct CannedClient {
    body: Vec<u8>,
    urls: Mutex<Vec<String>>,
}

impl CannedClient {
    fn new(body: Value) -> Self {
        Self {
            body: serde_json::to_vec(&body).unwrap(),
            urls: Mutex::new(Vec::new()),
        }
    }
}

impl AsyncHttpClient for CannedClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

fn params(cell_size_m: f64) -> GridParameters {
    GridParameters {
        origin_longitude: -71.09,
        origin_latitude: 42.36,
        rotation_degrees: 0.0,
        projection_id: "EPSG:3857".to_string(),
        cell_size_m,
        row_count: 2,
        column_count: 2,
        use_external_landuse: true,
    }
}

fn offline_creator() -> GridCreator<CannedClient> {
    GridCreator::new(
        CannedClient::new(json!({ "elements": [] })),
        OverpassConfig::default(),
    )
}

/// Centroids of a grid generated without external data.
fn centroids(p: &GridParameters) -> Vec<GeoPoint> {
    let (grid, _) = offline_creator()
        .generate_with_response(p, &TypesTable::cityscope(), &OverpassResponse::default())
        .unwrap();
    grid.cells().iter().map(|c| c.centroid()).collect()
}

/// Closed ring of `{lat, lon}` objects around `center`.
fn ring_around(center: GeoPoint, half_lon: f64, half_lat: f64) -> Value {
    let (w, e) = (center.lon - half_lon, center.lon + half_lon);
    let (s, n) = (center.lat - half_lat, center.lat + half_lat);
    json!([
        {"lat": n, "lon": w},
        {"lat": s, "lon": w},
        {"lat": s, "lon": e},
        {"lat": n, "lon": e},
        {"lat": n, "lon": w}
    ])
}

fn names(grid: &GridFeatureCollection) -> Vec<&str> {
    grid.cells().iter().map(|c| c.landuse.name.as_str()).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_fetch_and_classify_with_node_buffer() {
    let p = params(50.0);
    let c = centroids(&p);

    // A shop node at the first cell's centroid; its 10 m buffer reaches no
    // other centroid.
    let client = CannedClient::new(json!({
        "elements": [
            {"type": "node", "id": 77, "lat": c[0].lat, "lon": c[0].lon, "tags": {"shop": "books"}}
        ]
    }));
    let creator = GridCreator::new(client, OverpassConfig::default());

    let grid = creator.generate(&p, &TypesTable::cityscope()).await.unwrap();

    assert_eq!(
        names(&grid),
        vec!["Retail", "Residential", "Residential", "Residential"]
    );
}

#[test]
fn test_multipolygon_hole_excludes_cell() {
    let p = params(50.0);
    let c = centroids(&p);
    let center = GeoPoint {
        lon: (c[0].lon + c[3].lon) / 2.0,
        lat: (c[0].lat + c[3].lat) / 2.0,
    };

    let response = OverpassResponse::from_slice(
        &serde_json::to_vec(&json!({
            "elements": [{
                "type": "relation",
                "id": 500,
                "tags": {"type": "multipolygon", "leisure": "park"},
                "members": [
                    {"type": "way", "ref": 1, "role": "outer",
                     "geometry": ring_around(center, 0.01, 0.01)},
                    {"type": "way", "ref": 2, "role": "inner",
                     "geometry": ring_around(c[3], 0.0001, 0.0001)}
                ]
            }]
        }))
        .unwrap(),
    )
    .unwrap();

    let (grid, stats) = offline_creator()
        .generate_with_response(&p, &TypesTable::cityscope(), &response)
        .unwrap();

    assert_eq!(names(&grid), vec!["Park", "Park", "Park", "Residential"]);
    assert_eq!(stats.contained, 3);
    assert_eq!(stats.defaulted, 1);
}

#[test]
fn test_rotated_utm_grid() {
    let p = GridParameters {
        projection_id: "EPSG:32619".to_string(),
        rotation_degrees: 30.0,
        row_count: 3,
        column_count: 4,
        ..params(25.0)
    };

    let (grid, _) = offline_creator()
        .generate_with_response(&p, &TypesTable::cityscope(), &OverpassResponse::default())
        .unwrap();

    assert_eq!(grid.len(), 12);
    let first = grid.cells()[0].ring;
    let second = grid.cells()[1].ring;
    // Row axis follows bearing 60: the next column lies north-east
    assert!(second[0].lon > first[0].lon);
    assert!(second[0].lat > first[0].lat);
    for (i, cell) in grid.cells().iter().enumerate() {
        assert_eq!(cell.sequence_index, i);
        assert_eq!((cell.row, cell.column), (i / 4, i % 4));
    }
}

#[tokio::test]
async fn test_config_file_drives_generation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.ini");
    std::fs::write(
        &path,
        r#"
[grid]
longitude = -71.09
latitude = 42.36
cell_size = 20
rows = 3
columns = 3
use_osm = false
seed = 11

[type:Residential]
color = #002DD5
height = 50

[type:Park]
color = #4CAF50
height = 0
interactive = false
"#,
    )
    .unwrap();

    let config = ConfigFile::load_from(&path).unwrap();
    let types = config.types_table().unwrap();
    let creator = offline_creator().with_seed(config.grid.seed);

    let a = creator.generate(&config.grid_parameters(), &types).await.unwrap();
    let b = creator.generate(&config.grid_parameters(), &types).await.unwrap();

    assert_eq!(a.len(), 9);
    assert_eq!(a, b);
    for cell in a.cells() {
        assert!(["Residential", "Park"].contains(&cell.landuse.name.as_str()));
    }
}

#[test]
fn test_unknown_type_is_fatal() {
    let p = params(50.0);
    let c = centroids(&p);
    let response = OverpassResponse::from_slice(
        &serde_json::to_vec(&json!({
            "elements": [{
                "type": "way", "id": 3,
                "tags": {"landuse": "industrial"},
                "geometry": ring_around(c[1], 0.0001, 0.0001)
            }]
        }))
        .unwrap(),
    )
    .unwrap();
    let types = TypesTable::new(vec![gridmaker::landuse::LanduseType::new(
        "Residential",
        "#002DD5",
        50.0,
        true,
    )])
    .unwrap();

    let result = offline_creator().generate_with_response(&p, &types, &response);
    assert!(matches!(result, Err(GridError::UnknownType { name }) if name == "Industrial"));
}

#[test]
fn test_nearest_fallback_configured_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.ini");
    std::fs::write(&path, "[overpass]\nnearest_fallback = 500\n").unwrap();
    let config = ConfigFile::load_from(&path).unwrap();
    assert_eq!(
        config.join_config(),
        JoinConfig::new().with_nearest_fallback_m(500.0)
    );

    let p = params(50.0);
    let c = centroids(&p);
    // Office about 200 m north of the grid
    let far = GeoPoint {
        lon: c[0].lon,
        lat: c[0].lat + 0.002,
    };
    let response = OverpassResponse::from_slice(
        &serde_json::to_vec(&json!({
            "elements": [{
                "type": "way", "id": 4,
                "tags": {"office": "company"},
                "geometry": ring_around(far, 0.0001, 0.0001)
            }]
        }))
        .unwrap(),
    )
    .unwrap();

    let (grid, stats) = offline_creator()
        .with_join_config(config.join_config())
        .generate_with_response(&p, &TypesTable::cityscope(), &response)
        .unwrap();
    assert_eq!(names(&grid), vec!["Office"; 4]);
    assert_eq!(stats.nearest, 4);
}
