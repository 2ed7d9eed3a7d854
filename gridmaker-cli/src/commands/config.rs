//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use clap::Subcommand;
use gridmaker::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration as INI
    Show,

    /// Write a default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Show => {
            print!("{}", config.to_ini_string());
            Ok(())
        }
        ConfigCommands::Init => {
            let existed = config_file_path().exists();
            let path = ConfigFile::ensure_exists()?;
            if existed {
                println!("Configuration already exists: {}", path.display());
            } else {
                println!("Created default configuration: {}", path.display());
            }
            Ok(())
        }
    }
}
