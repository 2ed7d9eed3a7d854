//! Point-in-polygon spatial join between grid cells and external features.
//!
//! External features are classified once, then indexed by bounding box in an
//! R-tree. Each cell centroid is resolved against the index:
//!
//! ```text
//! centroid ──► R-tree envelope query ──► exact point-in-polygon test
//!                                          │
//!                         match? ──yes──►  lowest feature index wins
//!                            │
//!                            no ──► nearest centroid within radius (optional)
//!                                          │
//!                                          no ──► default type
//! ```
//!
//! # Usage
//!
//! ```
//! use geo::{polygon, Point};
//! use gridmaker::join::{ClassifiedPolygon, SpatialIndex};
//! use gridmaker::landuse::{LanduseCategory, Tags};
//! use gridmaker::overpass::RawExternalFeature;
//!
//! let mut tags = Tags::new();
//! tags.insert("leisure".to_string(), "park".to_string());
//! let feature = RawExternalFeature {
//!     id: "way/1".to_string(),
//!     tags,
//!     polygon: polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)],
//! };
//!
//! let index = SpatialIndex::new(vec![ClassifiedPolygon::new(feature)]);
//! let hit = index.containing(Point::new(0.5, 0.5)).unwrap();
//! assert_eq!(index.get(hit).unwrap().category, LanduseCategory::Park);
//! ```

mod classified;
mod index;

pub use classified::ClassifiedPolygon;
pub use index::{JoinMatch, SpatialIndex};
