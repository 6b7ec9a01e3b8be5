//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project config file name, searched from the working directory upwards
pub const PROJECT_CONFIG_NAME: &str = ".midnight-mirror.toml";

/// Machine-local project config, usually kept out of version control
pub const LOCAL_CONFIG_NAME: &str = ".midnight-mirror.local.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.midnight-mirror.local.toml)
    pub local: Option<PathBuf>,
    /// Project config (.midnight-mirror.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files, starting from the working directory
    ///
    /// Returns a `ConfigFiles` struct with paths to discovered configs.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        match std::env::current_dir() {
            Ok(cwd) => Self::discover_in(&cwd, cli_path),
            Err(_) => ConfigFiles {
                cli: cli_path.map(Path::to_path_buf),
                global: Self::find_global_config(),
                ..ConfigFiles::default()
            },
        }
    }

    /// Discover configuration files, searching project configs upwards from `start`
    ///
    /// An explicit CLI path is kept even if it does not exist, so that
    /// loading reports it instead of silently ignoring a typo.
    #[must_use]
    pub fn discover_in(start: &Path, cli_path: Option<&Path>) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            local: Self::find_file(start, LOCAL_CONFIG_NAME),
            project: Self::find_file(start, PROJECT_CONFIG_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in `start` or its parent directories
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let config_dir = dirs::config_dir()?;
        let global_config = config_dir.join("midnight-mirror").join("config.toml");

        global_config.is_file().then_some(global_config)
    }
}
