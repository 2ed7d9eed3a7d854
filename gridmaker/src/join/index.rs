//! R-tree index over classified polygons.

use geo::{BoundingRect, HaversineDistance, Intersects, Point};
use rstar::{RTree, RTreeObject, AABB};

use super::classified::ClassifiedPolygon;
use crate::coord::{destination_point, GeoPoint};

/// How a point was resolved against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMatch {
    /// The polygon at this index contains (or touches) the point
    Contained(usize),
    /// No polygon contains the point; this polygon's centroid is nearest
    Nearest(usize),
    /// Nothing matched
    Unmatched,
}

impl JoinMatch {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Contained(i) | Self::Nearest(i) => Some(i),
            Self::Unmatched => None,
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index over classified polygons in lon/lat degrees.
///
/// Polygon order is significant: when several polygons match a point, the
/// one with the lowest index wins.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<IndexedEnvelope>,
    polygons: Vec<ClassifiedPolygon>,
}

impl SpatialIndex {
    pub fn new(polygons: Vec<ClassifiedPolygon>) -> Self {
        let entries = polygons
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                p.feature.polygon.bounding_rect().map(|rect| IndexedEnvelope {
                    index,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            polygons,
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassifiedPolygon> {
        self.polygons.get(index)
    }

    /// Lowest-index polygon containing `point`; boundary points count.
    pub fn containing(&self, point: Point<f64>) -> Option<usize> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x(), point.y()]))
            .map(|entry| entry.index)
            .filter(|&i| self.polygons[i].feature.polygon.intersects(&point))
            .min()
    }

    /// Polygon whose centroid is nearest `point`, if within `radius_m`.
    ///
    /// Distance is great-circle; ties go to the lowest index.
    pub fn nearest_within(&self, point: Point<f64>, radius_m: f64) -> Option<usize> {
        if radius_m.is_nan() || radius_m <= 0.0 {
            return None;
        }

        let center = GeoPoint {
            lon: point.x(),
            lat: point.y(),
        };
        let north = destination_point(center, radius_m, 0.0);
        let east = destination_point(center, radius_m, 90.0);
        let south = destination_point(center, radius_m, 180.0);
        let west = destination_point(center, radius_m, 270.0);
        let search = AABB::from_corners([west.lon, south.lat], [east.lon, north.lat]);

        self.tree
            .locate_in_envelope_intersecting(&search)
            .filter_map(|entry| {
                let centroid = self.polygons[entry.index].centroid?;
                let distance = point.haversine_distance(&centroid);
                (distance <= radius_m).then_some((distance, entry.index))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, index)| index)
    }

    /// Containment first, then the nearest-centroid fallback.
    pub fn resolve(&self, point: Point<f64>, fallback_radius_m: f64) -> JoinMatch {
        if let Some(i) = self.containing(point) {
            return JoinMatch::Contained(i);
        }
        match self.nearest_within(point, fallback_radius_m) {
            Some(i) => JoinMatch::Nearest(i),
            None => JoinMatch::Unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landuse::{LanduseCategory, Tags};
    use crate::overpass::RawExternalFeature;
    use geo::{polygon, Polygon};

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]
    }

    fn classified(id: &str, tag: (&str, &str), polygon: Polygon<f64>) -> ClassifiedPolygon {
        let mut tags = Tags::new();
        tags.insert(tag.0.to_string(), tag.1.to_string());
        ClassifiedPolygon::new(RawExternalFeature {
            id: id.to_string(),
            tags,
            polygon,
        })
    }

    fn index() -> SpatialIndex {
        SpatialIndex::new(vec![
            // Large park covering the small office square
            classified("way/1", ("leisure", "park"), square(-71.1, 42.3, 0.01)),
            classified("way/2", ("office", "yes"), square(-71.095, 42.305, 0.001)),
            classified("way/3", ("shop", "mall"), square(-71.0, 42.3, 0.001)),
        ])
    }

    #[test]
    fn test_containment() {
        let idx = index();
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.containing(Point::new(-70.9995, 42.3005)), Some(2));
        assert_eq!(idx.containing(Point::new(-71.05, 42.35)), None);
    }

    #[test]
    fn test_overlap_tie_breaks_on_lowest_index() {
        let idx = index();
        let p = Point::new(-71.0945, 42.3055);
        assert_eq!(idx.containing(p), Some(0));
        assert_eq!(idx.get(0).unwrap().category, LanduseCategory::Park);
    }

    #[test]
    fn test_boundary_point_counts_as_contained() {
        let idx = index();
        assert_eq!(idx.containing(Point::new(-71.0, 42.3005)), Some(2));
    }

    #[test]
    fn test_nearest_disabled_by_zero_radius() {
        let idx = index();
        let p = Point::new(-70.9985, 42.3005);
        assert_eq!(idx.nearest_within(p, 0.0), None);
        assert_eq!(idx.resolve(p, 0.0), JoinMatch::Unmatched);
    }

    #[test]
    fn test_nearest_within_radius() {
        let idx = index();
        // About 100 m east of the mall's centroid
        let p = Point::new(-70.9983, 42.3005);
        assert_eq!(idx.nearest_within(p, 50.0), None);
        assert_eq!(idx.nearest_within(p, 200.0), Some(2));
        assert_eq!(idx.resolve(p, 200.0), JoinMatch::Nearest(2));
        assert_eq!(JoinMatch::Nearest(2).index(), Some(2));
    }

    #[test]
    fn test_nearest_ties_break_on_lowest_index() {
        let idx = SpatialIndex::new(vec![
            classified("way/1", ("office", "yes"), square(1.0, 0.0, 0.0001)),
            classified("way/2", ("shop", "yes"), square(1.0, 0.0, 0.0001)),
        ]);
        let p = Point::new(1.0002, 0.00005);
        assert_eq!(idx.nearest_within(p, 100.0), Some(0));
    }

    #[test]
    fn test_empty_index() {
        let idx = SpatialIndex::new(Vec::new());
        assert!(idx.is_empty());
        assert_eq!(idx.resolve(Point::new(0.0, 0.0), 100.0), JoinMatch::Unmatched);
    }
}
