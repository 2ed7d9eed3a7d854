//! Query text and bounding-box parameter for the land-use request.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::coord::GeoPoint;
use crate::landuse::{rules, TagPredicate};

/// Server-side timeout requested in the query header, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 120;

/// Builds the Overpass QL query selecting every feature any classifier rule
/// can match.
///
/// The selectors are derived from the classifier's rule list so the query
/// and the classification can never drift apart. The `[bbox]` setting makes
/// the server read the area from the `bbox` URL parameter.
pub fn landuse_query() -> String {
    let mut query = format!("[timeout:{}][out:json][bbox];\n(\n", QUERY_TIMEOUT_SECS);
    for rule in rules() {
        query.push_str(&format!("  // {}\n", rule.category));
        for predicate in rule.any_of {
            let filter = selector(predicate);
            for kind in ["way", "node", "relation"] {
                query.push_str(&format!("  {}{};\n", kind, filter));
            }
        }
    }
    query.push_str(");\nout body geom;\n");
    query
}

fn selector(predicate: &TagPredicate) -> String {
    match predicate {
        TagPredicate::Equals(key, value) => format!("[\"{}\"=\"{}\"]", key, value),
        TagPredicate::OneOf(key, values) => {
            format!("[\"{}\"~\"^({})$\"]", key, values.join("|"))
        }
        TagPredicate::Has(key) => format!("[\"{}\"]", key),
    }
}

/// Errors from parsing a bounding-box string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundingBoxError {
    #[error("Bounding box must have four comma-separated numbers, got '{0}'")]
    Format(String),

    #[error("Bounding box is inverted: min ({min_lon}, {min_lat}) exceeds max ({max_lon}, {max_lat})")]
    Inverted {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    },
}

/// A lon/lat rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, BoundingBoxError> {
        if min_lon > max_lon || min_lat > max_lat {
            return Err(BoundingBoxError::Inverted {
                min_lon,
                min_lat,
                max_lon,
                max_lat,
            });
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_lon: first.lon,
            min_lat: first.lat,
            max_lon: first.lon,
            max_lat: first.lat,
        };
        for p in iter {
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lon = bbox.max_lon.max(p.lon);
            bbox.max_lat = bbox.max_lat.max(p.lat);
        }
        Some(bbox)
    }
}

/// Formats as `minLon,minLat,maxLon,maxLat`, the order the `bbox` parameter expects.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| BoundingBoxError::Format(s.to_string()))?;

        match values.as_slice() {
            [min_lon, min_lat, max_lon, max_lat] if values.iter().all(|v| v.is_finite()) => {
                Self::new(*min_lon, *min_lat, *max_lon, *max_lat)
            }
            _ => Err(BoundingBoxError::Format(s.to_string())),
        }
    }
}
