//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::landuse::{parse_hex_color, LanduseType};

/// Prefix of per-type section names, e.g. `[type:Light Industrial]`.
pub(super) const TYPE_SECTION_PREFIX: &str = "type:";

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses `key` from `section` if present.
fn parse_value<T: FromStr>(
    props: &Properties,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match props.get(key).map(str::trim) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| invalid(section, key, v, reason)),
        None => Ok(None),
    }
}

/// Parses a finite float, optionally bounded.
fn parse_float(
    props: &Properties,
    section: &str,
    key: &str,
    range: Option<(f64, f64)>,
    reason: &str,
) -> Result<Option<f64>, ConfigFileError> {
    let Some(v) = parse_value::<f64>(props, section, key, reason)? else {
        return Ok(None);
    };
    let in_range = range.map_or(true, |(lo, hi)| (lo..=hi).contains(&v));
    if !v.is_finite() || !in_range {
        return Err(invalid(section, key, &v.to_string(), reason));
    }
    Ok(Some(v))
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        let grid = &mut config.grid;
        if let Some(v) = parse_float(
            section,
            "grid",
            "longitude",
            Some((MIN_LON, MAX_LON)),
            "must be a number between -180 and 180",
        )? {
            grid.longitude = v;
        }
        if let Some(v) = parse_float(
            section,
            "grid",
            "latitude",
            Some((MIN_LAT, MAX_LAT)),
            "must be a number between -90 and 90",
        )? {
            grid.latitude = v;
        }
        if let Some(v) = parse_float(section, "grid", "rotation", None, "must be a number (degrees)")? {
            grid.rotation = v;
        }
        if let Some(v) = section.get("projection") {
            let v = v.trim();
            if !v.is_empty() {
                grid.projection = v.to_string();
            }
        }
        if let Some(v) = parse_float(
            section,
            "grid",
            "cell_size",
            None,
            "must be a positive number (meters)",
        )? {
            if v <= 0.0 {
                return Err(invalid(
                    "grid",
                    "cell_size",
                    &v.to_string(),
                    "must be a positive number (meters)",
                ));
            }
            grid.cell_size = v;
        }
        for (key, slot) in [("rows", &mut grid.rows), ("columns", &mut grid.columns)] {
            if let Some(v) = parse_value::<usize>(section, "grid", key, "must be a positive integer")?
            {
                if v == 0 {
                    return Err(invalid("grid", key, "0", "must be a positive integer"));
                }
                *slot = v;
            }
        }
        if let Some(v) = section.get("use_osm") {
            grid.use_osm = parse_bool(v);
        }
        if let Some(v) = section.get("seed") {
            let v = v.trim();
            grid.seed = if v.is_empty() {
                None
            } else {
                Some(
                    v.parse()
                        .map_err(|_| invalid("grid", "seed", v, "must be an unsigned integer"))?,
                )
            };
        }
    }

    // [overpass] section
    if let Some(section) = ini.section(Some("overpass")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                config.overpass.endpoint = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout") {
            let v = v.trim();
            config.overpass.timeout = match v {
                "" | "0" | "none" => None,
                _ => Some(v.parse().map_err(|_| {
                    invalid(
                        "overpass",
                        "timeout",
                        v,
                        "must be a positive integer (seconds) or empty",
                    )
                })?),
            };
        }
        if let Some(v) = parse_float(
            section,
            "overpass",
            "nearest_fallback",
            Some((0.0, f64::MAX)),
            "must be a non-negative number (meters)",
        )? {
            config.overpass.nearest_fallback = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    // [type:<Name>] sections, in file order
    for (name, section) in ini.iter() {
        let Some(type_name) = name.and_then(|n| n.strip_prefix(TYPE_SECTION_PREFIX)) else {
            continue;
        };
        config
            .types
            .push(parse_type(type_name.trim(), name.unwrap_or_default(), section)?);
    }

    Ok(config)
}

fn parse_type(
    name: &str,
    section: &str,
    props: &Properties,
) -> Result<LanduseType, ConfigFileError> {
    if name.is_empty() {
        return Err(invalid(section, "name", "", "type name must not be empty"));
    }

    let color = props
        .get("color")
        .map(str::trim)
        .ok_or_else(|| invalid(section, "color", "", "is required"))?;
    if parse_hex_color(color).is_none() {
        return Err(invalid(
            section,
            "color",
            color,
            "must be a hex color like #002DD5",
        ));
    }

    let height = parse_float(props, section, "height", None, "must be a number")?.unwrap_or(0.0);
    let interactive = props.get("interactive").map(parse_bool).unwrap_or(true);

    Ok(LanduseType::new(name, color, height, interactive))
}

/// Parse a boolean config value.
///
/// Accepts `true`, `yes`, `1` and `on` (case-insensitive); anything else is false.
pub(super) fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

/// Expand a leading `~` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
