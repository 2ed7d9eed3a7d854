//! Projection identifier → PROJ.4 definition lookup.
//!
//! Only a small set of metric projections is built in. Any identifier that
//! starts with `+` is treated as a raw PROJ.4 string and passed through.

use super::ProjectionError;

/// Spherical Web Mercator (EPSG:3857 and its historical aliases).
const WEB_MERCATOR: &str =
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

/// World Mercator on the WGS84 ellipsoid.
const WORLD_MERCATOR: &str = "+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

/// NAD83 / Massachusetts Mainland (meters).
const MASSACHUSETTS_MAINLAND: &str = "+proj=lcc +lat_1=42.68333333333333 +lat_2=41.71666666666667 \
     +lat_0=41 +lon_0=-71.5 +x_0=200000 +y_0=750000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 \
     +units=m +no_defs";

/// WGS84 geographic coordinates.
const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Resolves a projection identifier to a PROJ.4 definition string.
///
/// Accepts `EPSG:<code>` (case-insensitive, prefix optional) for the
/// built-in codes, or a raw PROJ.4 string starting with `+`.
pub fn resolve(id: &str) -> Result<String, ProjectionError> {
    let trimmed = id.trim();
    if trimmed.starts_with('+') {
        return Ok(trimmed.to_string());
    }

    let upper = trimmed.to_ascii_uppercase();
    let code_str = upper.strip_prefix("EPSG:").unwrap_or(&upper);
    let code: u32 = code_str
        .parse()
        .map_err(|_| ProjectionError::UnknownCrs(id.to_string()))?;

    let definition = match code {
        4326 => WGS84_LONGLAT.to_string(),
        3857 | 900913 | 3785 | 102100 => WEB_MERCATOR.to_string(),
        3395 => WORLD_MERCATOR.to_string(),
        26986 => MASSACHUSETTS_MAINLAND.to_string(),
        32601..=32660 => utm(code - 32600, false),
        32701..=32760 => utm(code - 32700, true),
        _ => return Err(ProjectionError::UnknownCrs(id.to_string())),
    };
    Ok(definition)
}

fn utm(zone: u32, south: bool) -> String {
    let south = if south { " +south" } else { "" };
    format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs")
}

/// Returns true if the definition describes geographic (angular) coordinates.
pub fn is_geographic(definition: &str) -> bool {
    definition
        .split_whitespace()
        .any(|token| token == "+proj=longlat" || token == "+proj=latlong")
}

/// Builds the geographic CRS that lon/lat input is interpreted in for a
/// given planar definition.
///
/// Definitions carrying a datum, ellipsoid or shift parameters pair with
/// WGS84. Bare spheres (Web Mercator) pair with a longlat CRS on the same
/// sphere so no datum shift is applied.
pub fn geographic_base(definition: &str) -> String {
    let tokens: Vec<&str> = definition.split_whitespace().collect();
    let has_datum = tokens.iter().any(|t| {
        t.starts_with("+datum=")
            || t.starts_with("+ellps=")
            || t.starts_with("+towgs84=")
            || t.starts_with("+nadgrids=")
    });
    if has_datum {
        return WGS84_LONGLAT.to_string();
    }

    let shape: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| t.starts_with("+a=") || t.starts_with("+b=") || t.starts_with("+R="))
        .collect();
    if shape.is_empty() {
        WGS84_LONGLAT.to_string()
    } else {
        format!("+proj=longlat {} +no_defs", shape.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_web_mercator_aliases() {
        for id in ["EPSG:3857", "epsg:3857", "3857", "EPSG:900913"] {
            assert_eq!(resolve(id).unwrap(), WEB_MERCATOR, "id {}", id);
        }
    }

    #[test]
    fn test_resolve_utm_zones() {
        assert_eq!(
            resolve("EPSG:32619").unwrap(),
            "+proj=utm +zone=19 +datum=WGS84 +units=m +no_defs"
        );
        assert_eq!(
            resolve("EPSG:32733").unwrap(),
            "+proj=utm +zone=33 +south +datum=WGS84 +units=m +no_defs"
        );
    }

    #[test]
    fn test_resolve_raw_proj_string_passthrough() {
        let raw = "+proj=tmerc +lon_0=0 +datum=WGS84 +units=m";
        assert_eq!(resolve(raw).unwrap(), raw);
    }

    #[test]
    fn test_resolve_unknown_codes() {
        assert!(matches!(
            resolve("EPSG:1234"),
            Err(ProjectionError::UnknownCrs(_))
        ));
        assert!(matches!(
            resolve("mercator"),
            Err(ProjectionError::UnknownCrs(_))
        ));
        assert!(matches!(resolve(""), Err(ProjectionError::UnknownCrs(_))));
    }

    #[test]
    fn test_is_geographic() {
        assert!(is_geographic(WGS84_LONGLAT));
        assert!(!is_geographic(WEB_MERCATOR));
    }

    #[test]
    fn test_geographic_base_for_sphere_keeps_sphere() {
        assert_eq!(
            geographic_base(WEB_MERCATOR),
            "+proj=longlat +a=6378137 +b=6378137 +no_defs"
        );
    }

    #[test]
    fn test_geographic_base_for_datum_is_wgs84() {
        assert_eq!(geographic_base(WORLD_MERCATOR), WGS84_LONGLAT);
        assert_eq!(geographic_base(MASSACHUSETTS_MAINLAND), WGS84_LONGLAT);
    }
}
