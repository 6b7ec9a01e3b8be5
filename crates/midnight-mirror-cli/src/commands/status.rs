use std::path::Path;

use anyhow::Context;
use midnight_mirror_core::sync::{Planner, SyncContext, SyncOptions, SyncReporter};

use crate::commands::CommandOptions;

pub struct Status;

impl Status {
    pub fn execute(source: &Path, mirror: &Path, options: &CommandOptions) -> anyhow::Result<()> {
        let config = options.load_config()?;

        let context = SyncContext::resolve(&SyncOptions::new(source, mirror), &config)
            .context("Failed to resolve sync directories")?;

        if options.verbose {
            println!("Source: {}", context.source_root().display());
            println!("Mirror: {}", context.mirror_root().display());
        }

        let plan = Planner::new()
            .preview(&context)
            .context("Failed to compute sync status")?;

        println!("{}", SyncReporter::generate_plan(&plan));

        Ok(())
    }
}
