//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`classify`] - Classify a saved Overpass response
//! - [`config`] - Configuration management (path, show, init)
//! - [`generate`] - Grid generation

pub mod classify;
pub mod common;
pub mod config;
pub mod generate;
