//! Subcommand implementations.

pub mod check;
pub mod links;
pub mod reload;

use anyhow::Result;
use blacklint_core::ScanConfig;
use log::debug;
use std::path::Path;

/// Loads the scan configuration from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    match path {
        Some(path) => ScanConfig::load_from_file(path),
        None => {
            debug!("No configuration file given; using default conventions.");
            Ok(ScanConfig::default())
        }
    }
}
