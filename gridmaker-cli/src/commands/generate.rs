//! Grid generation command.
//!
//! Settings come from `config.ini`; any flag given on the command line
//! overrides the corresponding `[grid]` or `[overpass]` value.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use gridmaker::config::ConfigFile;
use gridmaker::grid::{GridCreator, GridFeatureCollection, GridParameters};
use tracing::info;

use super::common::read_overpass_file;
use crate::error::CliError;

/// Arguments for `gridmaker generate`.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Origin longitude in decimal degrees (top-left corner)
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Origin latitude in decimal degrees (top-left corner)
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Rotation in degrees; the row axis follows bearing (90 - rotation)
    #[arg(long, allow_hyphen_values = true)]
    pub rotation: Option<f64>,

    /// Planar projection, e.g. EPSG:3857, EPSG:32619 or a PROJ string
    #[arg(long)]
    pub projection: Option<String>,

    /// Cell edge length in meters
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Number of rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns (at least 2)
    #[arg(long)]
    pub columns: Option<usize>,

    /// Classify cells from OpenStreetMap via the Overpass API
    #[arg(long)]
    pub osm: bool,

    /// Classify cells from a saved Overpass JSON response instead of querying
    #[arg(long, value_name = "PATH")]
    pub osm_file: Option<PathBuf>,

    /// Nearest-centroid fallback radius in meters (0 disables)
    #[arg(long)]
    pub nearest_fallback: Option<f64>,

    /// Seed for random type assignment
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write GeoJSON to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Overlays command-line flags on the config file settings.
    pub fn apply_to(&self, config: &mut ConfigFile) {
        let grid = &mut config.grid;
        if let Some(v) = self.longitude {
            grid.longitude = v;
        }
        if let Some(v) = self.latitude {
            grid.latitude = v;
        }
        if let Some(v) = self.rotation {
            grid.rotation = v;
        }
        if let Some(v) = &self.projection {
            grid.projection = v.clone();
        }
        if let Some(v) = self.cell_size {
            grid.cell_size = v;
        }
        if let Some(v) = self.rows {
            grid.rows = v;
        }
        if let Some(v) = self.columns {
            grid.columns = v;
        }
        if self.osm || self.osm_file.is_some() {
            grid.use_osm = true;
        }
        if self.seed.is_some() {
            grid.seed = self.seed;
        }
        if let Some(v) = self.nearest_fallback {
            config.overpass.nearest_fallback = v;
        }
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs, mut config: ConfigFile) -> Result<(), CliError> {
    args.apply_to(&mut config);

    let params = config.grid_parameters();
    let types = config.types_table()?;
    let creator = GridCreator::from_config(config.overpass_config())?
        .with_join_config(config.join_config())
        .with_seed(config.grid.seed);

    info!(
        longitude = params.origin_longitude,
        latitude = params.origin_latitude,
        rows = params.row_count,
        columns = params.column_count,
        projection = %params.projection_id,
        osm = params.use_external_landuse,
        "Generating grid"
    );

    let grid = match &args.osm_file {
        Some(path) => {
            let response = read_overpass_file(path)?;
            let (grid, stats) = creator.generate_with_response(&params, &types, &response)?;
            info!(
                contained = stats.contained,
                nearest = stats.nearest,
                defaulted = stats.defaulted,
                "Classified from {}",
                path.display()
            );
            grid
        }
        None => generate_online(&creator, &params, &types)?,
    };

    write_output(&grid, args.output.as_deref())
}

fn generate_online(
    creator: &GridCreator<gridmaker::http::AsyncReqwestClient>,
    params: &GridParameters,
    types: &gridmaker::landuse::TypesTable,
) -> Result<GridFeatureCollection, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(creator.generate(params, types))?)
}

fn write_output(grid: &GridFeatureCollection, output: Option<&Path>) -> Result<(), CliError> {
    let json = grid.to_geojson_string().map_err(CliError::Serialize)?;

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|error| CliError::FileWrite {
                path: path.to_path_buf(),
                error,
            })?;
            info!(cells = grid.len(), "Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).map_err(|error| CliError::FileWrite {
                path: PathBuf::from("<stdout>"),
                error,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmaker::config::DEFAULT_ROWS;
    use gridmaker::grid::GridParameters;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let mut config = ConfigFile::default();
        let args = GenerateArgs {
            longitude: Some(-0.1276),
            latitude: Some(51.5072),
            rotation: Some(-30.0),
            projection: Some("EPSG:32630".to_string()),
            columns: Some(8),
            seed: Some(5),
            nearest_fallback: Some(15.0),
            ..Default::default()
        };

        args.apply_to(&mut config);

        assert_eq!(config.grid.longitude, -0.1276);
        assert_eq!(config.grid.latitude, 51.5072);
        assert_eq!(config.grid.rotation, -30.0);
        assert_eq!(config.grid.projection, "EPSG:32630");
        assert_eq!(config.grid.columns, 8);
        assert_eq!(config.grid.rows, DEFAULT_ROWS);
        assert_eq!(config.grid.seed, Some(5));
        assert_eq!(config.overpass.nearest_fallback, 15.0);
        assert!(!config.grid.use_osm);
    }

    #[test]
    fn test_osm_file_enables_external_landuse() {
        let mut config = ConfigFile::default();
        let args = GenerateArgs {
            osm_file: Some(PathBuf::from("response.json")),
            ..Default::default()
        };
        args.apply_to(&mut config);
        assert!(config.grid.use_osm);
    }

    #[test]
    fn test_offline_generation_writes_geojson() {
        let temp_dir = TempDir::new().unwrap();
        let osm_file = temp_dir.path().join("response.json");
        let output = temp_dir.path().join("grid.geojson");
        std::fs::write(
            &osm_file,
            r#"{"elements":[{"type":"way","id":5,"tags":{"leisure":"park"},"geometry":[
                {"lat":42.3605,"lon":-71.0905},{"lat":42.3595,"lon":-71.0905},
                {"lat":42.3595,"lon":-71.0895},{"lat":42.3605,"lon":-71.0895},
                {"lat":42.3605,"lon":-71.0905}]}]}"#,
        )
        .unwrap();

        let args = GenerateArgs {
            longitude: Some(-71.09),
            latitude: Some(42.36),
            rows: Some(2),
            columns: Some(2),
            osm_file: Some(osm_file),
            output: Some(output.clone()),
            ..Default::default()
        };
        run(args, ConfigFile::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 4);
        for feature in features {
            assert_eq!(feature["properties"]["name"], "Park");
        }
    }

    #[test]
    fn test_degenerate_grid_reported() {
        let temp_dir = TempDir::new().unwrap();
        let osm_file = temp_dir.path().join("response.json");
        std::fs::write(&osm_file, r#"{"elements":[]}"#).unwrap();

        let args = GenerateArgs {
            columns: Some(1),
            osm_file: Some(osm_file),
            ..Default::default()
        };
        let result = run(args, ConfigFile::default());
        assert!(matches!(
            result,
            Err(CliError::Grid(gridmaker::grid::GridError::DegenerateGrid { .. }))
        ));
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(ConfigFile::default().grid_parameters().validate().is_ok());
        assert_eq!(
            ConfigFile::default().grid_parameters(),
            GridParameters::default()
        );
    }
}
