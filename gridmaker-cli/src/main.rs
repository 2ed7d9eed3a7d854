//! gridmaker CLI - Command-line interface
//!
//! Generates rotated land-use grids as GeoJSON.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gridmaker::config::ConfigFile;
use gridmaker::logging::init_logging;
use tracing::debug;

use commands::classify::ClassifyArgs;
use commands::config::ConfigCommands;
use commands::generate::GenerateArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "gridmaker")]
#[command(version = gridmaker::VERSION)]
#[command(about = "Generate rotated land-use grids for CityScope tables", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.gridmaker/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a grid and write it as GeoJSON
    Generate(GenerateArgs),

    /// Classify the features in a saved Overpass response
    Classify(ClassifyArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    match cli.command {
        Commands::Config { command } => commands::config::run(command, &config),
        Commands::Generate(args) => {
            let _guard = init_logging(&config.logging.file, cli.verbose)
                .map_err(|e| CliError::LoggingInit(e.to_string()))?;
            debug!(log_file = %config.logging.file.display(), "Logging initialized");
            commands::generate::run(args, config)
        }
        Commands::Classify(args) => commands::classify::run(args),
    }
}
