mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandOptions;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Manifest entries are saved per created file, so stopping mid-run is safe
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = CommandOptions::new(cli.verbose, cli.config.as_deref(), cli.no_config);

    match &cli.command {
        Commands::Sync {
            source,
            mirror,
            resize,
        } => {
            commands::Sync::execute(source, mirror, *resize, &options)
                .context("Failed to execute sync command")?;
        }
        Commands::Status { source, mirror } => {
            commands::Status::execute(source, mirror, &options)
                .context("Failed to execute status command")?;
        }
        Commands::Config => {
            commands::Config::execute(&options).context("Failed to execute config command")?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}
