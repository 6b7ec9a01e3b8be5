//! Configuration merging with precedence rules
//!
//! Every field is optional. A field set in a higher-precedence file replaces
//! the value from lower-precedence files; unset fields are inherited.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .midnight-mirror.local.toml
    /// 3. .midnight-mirror.toml
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        // Load and merge in reverse precedence order (lowest to highest)
        for path in [&files.global, &files.project, &files.local, &files.cli]
            .into_iter()
            .flatten()
        {
            merged.override_with(Self::load_file(path)?);
        }

        Ok(merged)
    }

    /// Load a single config file
    fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
