//! Conversion of Overpass elements into polygon features.
//!
//! - Closed ways become polygons.
//! - Tagged nodes are buffered by [`NODE_BUFFER_M`] and replaced by the
//!   envelope of the buffer, a square around the node.
//! - Multipolygon relations contribute one polygon per assembled outer ring,
//!   with inner rings attached as holes.
//!
//! Open ways, untagged nodes and other element kinds cannot contain a point
//! and are dropped. Output order is ways, then nodes, then relations, each
//! in response order; the spatial join relies on this order for tie-breaks.

use geo::{Contains, Coord, LineString, Point, Polygon};
use tracing::debug;

use super::response::{Element, LatLon, Member};
use crate::coord::{destination_point, GeoPoint};
use crate::landuse::Tags;

/// Buffer radius applied to point features, in meters.
pub const NODE_BUFFER_M: f64 = 10.0;

/// An external feature with its tags and polygon geometry (lon/lat degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct RawExternalFeature {
    /// `node/<id>`, `way/<id>` or `relation/<id>`
    pub id: String,
    pub tags: Tags,
    pub polygon: Polygon<f64>,
}

/// Converts response elements to polygon features.
pub fn to_features(elements: &[Element]) -> Vec<RawExternalFeature> {
    let mut ways = Vec::new();
    let mut nodes = Vec::new();
    let mut relations = Vec::new();
    let mut skipped = 0usize;

    for element in elements {
        match element {
            Element::Way { id, geometry, tags } => match closed_ring(geometry) {
                Some(ring) => ways.push(RawExternalFeature {
                    id: format!("way/{}", id),
                    tags: tags.clone(),
                    polygon: Polygon::new(ring, Vec::new()),
                }),
                None => skipped += 1,
            },
            Element::Node { id, lat, lon, tags } if !tags.is_empty() => {
                nodes.push(RawExternalFeature {
                    id: format!("node/{}", id),
                    tags: tags.clone(),
                    polygon: node_envelope(GeoPoint {
                        lon: *lon,
                        lat: *lat,
                    }),
                });
            }
            Element::Relation { id, members, tags }
                if tags.get("type").map(String::as_str) == Some("multipolygon") =>
            {
                let polygons = multipolygon(members);
                if polygons.is_empty() {
                    skipped += 1;
                }
                relations.extend(polygons.into_iter().map(|polygon| RawExternalFeature {
                    id: format!("relation/{}", id),
                    tags: tags.clone(),
                    polygon,
                }));
            }
            _ => skipped += 1,
        }
    }

    debug!(
        ways = ways.len(),
        nodes = nodes.len(),
        relation_polygons = relations.len(),
        skipped = skipped,
        "Converted Overpass elements"
    );

    ways.extend(nodes);
    ways.extend(relations);
    ways
}

/// Square envelope of a circular buffer around a point.
fn node_envelope(center: GeoPoint) -> Polygon<f64> {
    let north = destination_point(center, NODE_BUFFER_M, 0.0).lat;
    let east = destination_point(center, NODE_BUFFER_M, 90.0).lon;
    let south = destination_point(center, NODE_BUFFER_M, 180.0).lat;
    let west = destination_point(center, NODE_BUFFER_M, 270.0).lon;

    Polygon::new(
        LineString::from(vec![
            (west, south),
            (east, south),
            (east, north),
            (west, north),
            (west, south),
        ]),
        Vec::new(),
    )
}

fn coords(geometry: &[Option<LatLon>]) -> Vec<Coord<f64>> {
    geometry
        .iter()
        .flatten()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect()
}

fn is_closed_ring(coords: &[Coord<f64>]) -> bool {
    coords.len() >= 4 && coords.first() == coords.last()
}

fn closed_ring(geometry: &[Option<LatLon>]) -> Option<LineString<f64>> {
    let coords = coords(geometry);
    is_closed_ring(&coords).then(|| LineString::new(coords))
}

fn multipolygon(members: &[Member]) -> Vec<Polygon<f64>> {
    let segments_for = |role: &str| -> Vec<Vec<Coord<f64>>> {
        members
            .iter()
            .filter(|m| m.kind == "way" && m.role == role)
            .map(|m| coords(&m.geometry))
            .filter(|c| c.len() >= 2)
            .collect()
    };

    // Members with an empty role are treated as outer rings
    let mut outer_segments = segments_for("outer");
    outer_segments.extend(segments_for(""));
    let outers = assemble_rings(outer_segments);
    let inners = assemble_rings(segments_for("inner"));

    let mut polygons: Vec<Polygon<f64>> = outers
        .into_iter()
        .map(|ring| Polygon::new(LineString::new(ring), Vec::new()))
        .collect();

    for inner in inners {
        let probe = Point::from(inner[0]);
        if let Some(outer) = polygons.iter_mut().find(|p| p.contains(&probe)) {
            outer.interiors_push(LineString::new(inner));
        }
    }

    polygons
}

/// Stitches way segments that share endpoints into closed rings.
///
/// Segments that cannot be closed are discarded.
fn assemble_rings(mut segments: Vec<Vec<Coord<f64>>>) -> Vec<Vec<Coord<f64>>> {
    let mut rings = Vec::new();

    while let Some(mut ring) = segments.pop() {
        while !is_closed_ring(&ring) {
            let Some(&end) = ring.last() else { break };
            let next = segments.iter().position(|s| {
                s.first() == Some(&end) || s.last() == Some(&end)
            });
            let Some(index) = next else { break };

            let mut segment = segments.swap_remove(index);
            if segment.first() != Some(&end) {
                segment.reverse();
            }
            ring.extend(segment.into_iter().skip(1));
        }

        if is_closed_ring(&ring) {
            rings.push(ring);
        }
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overpass::OverpassResponse;

    fn ll(lat: f64, lon: f64) -> Option<LatLon> {
        Some(LatLon { lat, lon })
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn square(lat0: f64, lon0: f64, size: f64) -> Vec<Option<LatLon>> {
        vec![
            ll(lat0, lon0),
            ll(lat0, lon0 + size),
            ll(lat0 + size, lon0 + size),
            ll(lat0 + size, lon0),
            ll(lat0, lon0),
        ]
    }

    #[test]
    fn test_closed_way_becomes_polygon() {
        let elements = vec![Element::Way {
            id: 7,
            geometry: square(42.0, -71.0, 0.001),
            tags: tags(&[("building", "office")]),
        }];

        let features = to_features(&elements);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id, "way/7");
        assert_eq!(features[0].polygon.exterior().0.len(), 5);
        assert!(features[0]
            .polygon
            .contains(&Point::new(-70.9995, 42.0005)));
    }

    #[test]
    fn test_open_way_is_skipped() {
        let elements = vec![Element::Way {
            id: 8,
            geometry: vec![ll(42.0, -71.0), ll(42.1, -71.0), ll(42.1, -71.1)],
            tags: tags(&[("railway", "narrow_gauge")]),
        }];
        assert!(to_features(&elements).is_empty());
    }

    #[test]
    fn test_tagged_node_becomes_square_envelope() {
        let elements = vec![Element::Node {
            id: 9,
            lat: 42.36,
            lon: -71.09,
            tags: tags(&[("amenity", "parking")]),
        }];

        let features = to_features(&elements);
        assert_eq!(features.len(), 1);
        let feature = &features[0];
        assert_eq!(feature.id, "node/9");
        assert!(feature.polygon.contains(&Point::new(-71.09, 42.36)));

        // ~10 m north of the node is on the boundary, 15 m is outside
        let inside = destination_point(GeoPoint { lon: -71.09, lat: 42.36 }, 8.0, 0.0);
        let outside = destination_point(GeoPoint { lon: -71.09, lat: 42.36 }, 15.0, 0.0);
        assert!(feature.polygon.contains(&Point::new(inside.lon, inside.lat)));
        assert!(!feature.polygon.contains(&Point::new(outside.lon, outside.lat)));
    }

    #[test]
    fn test_untagged_node_is_skipped() {
        let elements = vec![Element::Node {
            id: 10,
            lat: 0.0,
            lon: 0.0,
            tags: Tags::new(),
        }];
        assert!(to_features(&elements).is_empty());
    }

    #[test]
    fn test_output_order_ways_then_nodes_then_relations() {
        let json = br#"{"elements": [
            {"type": "node", "id": 1, "lat": 0.5, "lon": 0.5, "tags": {"shop": "kiosk"}},
            {"type": "relation", "id": 2, "tags": {"type": "multipolygon", "leisure": "park"},
             "members": [{"type": "way", "ref": 20, "role": "outer", "geometry": [
                {"lat": 0, "lon": 0}, {"lat": 0, "lon": 1}, {"lat": 1, "lon": 1}, {"lat": 1, "lon": 0}, {"lat": 0, "lon": 0}
             ]}]},
            {"type": "way", "id": 3, "tags": {"landuse": "retail"}, "geometry": [
                {"lat": 0, "lon": 0}, {"lat": 0, "lon": 2}, {"lat": 2, "lon": 2}, {"lat": 0, "lon": 0}
            ]}
        ]}"#;
        let response = OverpassResponse::from_slice(json).unwrap();

        let ids: Vec<_> = to_features(&response.elements)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["way/3", "node/1", "relation/2"]);
    }

    #[test]
    fn test_multipolygon_stitches_split_outer_and_attaches_hole() {
        let members = vec![
            Member {
                kind: "way".to_string(),
                reference: 1,
                role: "outer".to_string(),
                geometry: vec![ll(0.0, 0.0), ll(0.0, 4.0), ll(4.0, 4.0)],
            },
            Member {
                kind: "way".to_string(),
                reference: 2,
                role: "outer".to_string(),
                // Reversed direction relative to the first segment
                geometry: vec![ll(0.0, 0.0), ll(4.0, 0.0), ll(4.0, 4.0)],
            },
            Member {
                kind: "way".to_string(),
                reference: 3,
                role: "inner".to_string(),
                geometry: square(1.0, 1.0, 1.0),
            },
            Member {
                kind: "node".to_string(),
                reference: 4,
                role: "label".to_string(),
                geometry: vec![],
            },
        ];
        let elements = vec![Element::Relation {
            id: 99,
            members,
            tags: tags(&[("type", "multipolygon"), ("leisure", "park")]),
        }];

        let features = to_features(&elements);
        assert_eq!(features.len(), 1);
        let polygon = &features[0].polygon;
        assert_eq!(polygon.interiors().len(), 1);
        assert!(polygon.contains(&Point::new(3.0, 3.0)));
        assert!(!polygon.contains(&Point::new(1.5, 1.5)), "inside the hole");
    }

    #[test]
    fn test_non_multipolygon_relation_is_skipped() {
        let elements = vec![Element::Relation {
            id: 5,
            members: vec![],
            tags: tags(&[("type", "route")]),
        }];
        assert!(to_features(&elements).is_empty());
    }

    #[test]
    fn test_assemble_rings_discards_unclosable() {
        let rings = assemble_rings(vec![vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
        ]]);
        assert!(rings.is_empty());
    }
}
