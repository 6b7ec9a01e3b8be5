use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Midnight Mirror
///
/// Keep a mirror directory of stubs and thumbnails in sync with a source directory
#[derive(Parser, Debug)]
#[command(name = "midnight-mirror")]
#[command(long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the mirror with the source
    Sync {
        /// Authoritative source directory
        source: PathBuf,

        /// Mirror directory (created if missing)
        mirror: PathBuf,

        /// Thumbnail width and height in pixels
        #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
        resize: Option<u32>,
    },

    /// Show what a sync would do without making changes
    Status {
        /// Authoritative source directory
        source: PathBuf,

        /// Mirror directory
        mirror: PathBuf,
    },

    /// Show the active configuration
    Config,
}
