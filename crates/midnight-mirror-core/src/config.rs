//! Configuration file parsing, merging, and validation
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation and error reporting

mod discovery;
mod merge;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

pub use discovery::{ConfigDiscovery, ConfigFiles};
pub use merge::ConfigMerger;
pub use types::Config;
pub use validation::ConfigValidator;

use std::path::Path;

use crate::error::Result;

/// Configuration manager that coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        // Discover all config files
        let config_files = ConfigDiscovery::discover(cli_config_path);

        Self::load_from(&config_files)
    }

    /// Merge and validate an explicit set of config files
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load_from(config_files: &ConfigFiles) -> Result<Config> {
        let merged = ConfigMerger::merge(config_files)?;

        // Validate the final configuration
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }
}
