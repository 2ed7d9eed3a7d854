//! OpenStreetMap data via the Overpass API.
//!
//! - [`query`] builds the land-use query text and the bounding-box parameter
//! - [`response`] models the JSON answer
//! - [`convert`] turns elements into polygon features for the spatial join
//! - [`client`] issues the single GET request per grid generation

mod client;
mod convert;
mod query;
mod response;

pub use client::{OverpassClient, OverpassError};
pub use convert::{to_features, RawExternalFeature, NODE_BUFFER_M};
pub use query::{landuse_query, BoundingBox, BoundingBoxError};
pub use response::{Element, LatLon, Member, OverpassResponse};
