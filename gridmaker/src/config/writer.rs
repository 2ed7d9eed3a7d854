//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::fmt::Write;
use std::path::Path;

use super::parser::TYPE_SECTION_PREFIX;
use super::settings::ConfigFile;
use crate::landuse::{LanduseType, TypesTable};

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let seed = config
        .grid
        .seed
        .map(|s| s.to_string())
        .unwrap_or_default();
    let timeout = config
        .overpass
        .timeout
        .map(|t| t.to_string())
        .unwrap_or_default();
    let use_osm = if config.grid.use_osm { "true" } else { "false" };

    let mut out = format!(
        r#"[grid]
; Top-left corner of the grid in degrees
longitude = {}
latitude = {}
; Rotation in degrees; the row axis follows compass bearing (90 - rotation)
rotation = {}
; Planar projection for metric spacing: EPSG:3857, EPSG:3395, EPSG:26986,
; EPSG:326xx/327xx (UTM), or a raw PROJ string starting with '+'
projection = {}
; Cell edge length in meters
cell_size = {}
rows = {}
columns = {}
; Classify cells from OpenStreetMap land use instead of random types
use_osm = {}
; Seed for random type assignment (empty = random each run)
seed = {}

[overpass]
; Overpass API interpreter URL
endpoint = {}
; Request timeout in seconds (empty = wait indefinitely)
timeout = {}
; Cells outside every polygon take the type of the nearest polygon whose
; centroid lies within this many meters (0 = disabled)
nearest_fallback = {}

[logging]
; Log file location (truncated on every run)
file = {}
"#,
        config.grid.longitude,
        config.grid.latitude,
        config.grid.rotation,
        config.grid.projection,
        config.grid.cell_size,
        config.grid.rows,
        config.grid.columns,
        use_osm,
        seed,
        config.overpass.endpoint,
        timeout,
        config.overpass.nearest_fallback,
        path_to_string(&config.logging.file),
    );

    out.push_str(
        "\n; Land-use types, one [type:<Name>] section each. A 'Residential' type is\n\
         ; required; it is used for cells no feature classifies.\n",
    );
    if config.types.is_empty() {
        out.push_str("; No types configured: the built-in table below is used.\n");
        for t in TypesTable::cityscope().iter() {
            out.push_str(&type_section(t, "; "));
        }
    } else {
        for t in &config.types {
            out.push_str(&type_section(t, ""));
        }
    }
    out
}

fn type_section(t: &LanduseType, prefix: &str) -> String {
    let mut s = String::new();
    // Writing to a String cannot fail
    let _ = write!(
        s,
        "\n{p}[{}{}]\n{p}color = {}\n{p}height = {}\n{p}interactive = {}\n",
        TYPE_SECTION_PREFIX,
        t.name,
        t.color,
        t.height,
        t.interactive,
        p = prefix,
    );
    s
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.grid.longitude = 2.3522;
        config.grid.latitude = 48.8566;
        config.grid.rotation = -15.0;
        config.grid.projection = "EPSG:32631".to_string();
        config.grid.cell_size = 12.5;
        config.grid.rows = 7;
        config.grid.columns = 9;
        config.grid.use_osm = true;
        config.grid.seed = Some(1234);
        config.overpass.timeout = Some(60);
        config.overpass.nearest_fallback = 30.0;
        config.logging.file = PathBuf::from("/tmp/gridmaker-test.log");
        config.types = vec![
            LanduseType::new("Residential", "#002DD5", 50.0, true),
            LanduseType::new("Light Industrial", "#F8E71C", 20.0, false),
        ];

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_defaults_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let config = ConfigFile::default();
        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
        assert!(loaded.types.is_empty());
        assert_eq!(loaded.overpass.endpoint, DEFAULT_OVERPASS_ENDPOINT);
    }

    #[test]
    fn test_builtin_types_written_as_comments() {
        let text = to_config_string(&ConfigFile::default());
        assert!(text.contains("; [type:Residential]"));
        assert!(text.contains("; color = #002DD5"));
        assert!(!text.contains("\n[type:"));
    }
}
