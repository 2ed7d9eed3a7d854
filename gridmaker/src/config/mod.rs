//! Configuration for gridmaker components.
//!
//! Two layers live here:
//!
//! - [`ConfigFile`]: the user's `~/.gridmaker/config.ini`, parsed with
//!   rust-ini into plain settings structs
//! - Runtime builders ([`OverpassConfig`], [`JoinConfig`]) consumed by the
//!   fetcher and the spatial join
//!
//! # Example
//!
//! ```
//! use gridmaker::config::{ConfigFile, JoinConfig, OverpassConfig};
//!
//! let file = ConfigFile::default();
//! let overpass: OverpassConfig = file.overpass_config();
//! let join: JoinConfig = file.join_config();
//!
//! assert!(overpass.timeout_secs().is_none());
//! assert!(!join.has_nearest_fallback());
//! ```

mod defaults;
mod file;
mod join;
mod overpass;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use join::JoinConfig;
pub use overpass::OverpassConfig;
pub use settings::{ConfigFile, GridSettings, LoggingSettings, OverpassSettings};
