use std::path::Path;

use anyhow::Context;
use midnight_mirror_core::sync::{Reconciler, SyncContext, SyncOptions, SyncReporter};

use crate::commands::CommandOptions;

pub struct Sync;

impl Sync {
    pub fn execute(
        source: &Path,
        mirror: &Path,
        resize: Option<u32>,
        options: &CommandOptions,
    ) -> anyhow::Result<()> {
        let config = options.load_config()?;

        let mut sync_options = SyncOptions::new(source, mirror);
        sync_options.resize = resize;

        let context = SyncContext::resolve(&sync_options, &config)
            .context("Failed to resolve sync directories")?;

        if options.verbose {
            println!("Source: {}", context.source_root().display());
            println!("Mirror: {}", context.mirror_root().display());
            println!("Thumbnail size: {}px", context.resize());
        }

        let result = Reconciler::new(context)
            .sync()
            .context("Sync operation failed")?;

        println!("{}", SyncReporter::generate_summary(&result));

        Ok(())
    }
}
