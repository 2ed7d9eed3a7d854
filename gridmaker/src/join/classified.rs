//! External features paired with their land-use category.

use geo::{Centroid, Point};

use crate::landuse::{classify, LanduseCategory};
use crate::overpass::RawExternalFeature;

/// A polygon feature and the category its tags classify to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPolygon {
    pub feature: RawExternalFeature,
    pub category: LanduseCategory,
    /// `None` when the exterior ring is empty
    pub centroid: Option<Point<f64>>,
}

impl ClassifiedPolygon {
    pub fn new(feature: RawExternalFeature) -> Self {
        let category = classify(&feature.tags);
        let centroid = feature.polygon.centroid();
        Self {
            feature,
            category,
            centroid,
        }
    }

    /// Classifies a batch, preserving order.
    pub fn classify_all(features: Vec<RawExternalFeature>) -> Vec<Self> {
        features.into_iter().map(Self::new).collect()
    }
}
