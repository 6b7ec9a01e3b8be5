//! Common types and utilities for command execution

use std::path::Path;

use anyhow::Context;
use midnight_mirror_core::config::{Config, ConfigManager};

/// Execution options shared by every command
pub struct CommandOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl<'a> CommandOptions<'a> {
    /// Create new command options
    #[must_use]
    pub const fn new(verbose: bool, config_path: Option<&'a Path>, no_config: bool) -> Self {
        Self {
            verbose,
            config_path,
            no_config,
        }
    }

    /// Load the merged configuration, or defaults with `--no-config`
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if self.no_config {
            return Ok(Config::default());
        }

        ConfigManager::load(self.config_path).context("Failed to load configuration")
    }
}
