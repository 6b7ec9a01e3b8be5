//! Sync orchestration - runs the three reconciliation phases
//!
//! Each phase lists the disk afresh: phase B relies on phase A's source
//! deletions being on disk, and phase C relies on phase B's creations.
//! Phases run strictly in order and only one manifest write is ever in
//! flight.

use tracing::{debug, info};

use super::SyncResult;
use super::context::SyncContext;
use super::executor::{path_occupied, remove_file_if_exists};
use crate::error::Result;
use crate::manifest::{Manifest, ManifestEntry};
use crate::materializer::Materialized;
use crate::scanner::Scanner;

/// Three-way reconciler between a source, a mirror and the mirror's manifest
pub struct Reconciler {
    context: SyncContext,
    scanner: Scanner,
}

impl Reconciler {
    /// Create a reconciler for a resolved context
    #[must_use]
    pub fn new(context: SyncContext) -> Self {
        Self {
            context,
            scanner: Scanner::new(),
        }
    }

    /// The context this reconciler runs with
    #[must_use]
    pub const fn context(&self) -> &SyncContext {
        &self.context
    }

    /// Run one synchronization pass
    ///
    /// Partial progress stays on disk if a later step fails: every mirror
    /// file created so far is already recorded in the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error on any I/O failure other than deleting a file that
    /// is already gone.
    pub fn sync(&self) -> Result<SyncResult> {
        let mut result = SyncResult::default();

        info!(
            source = %self.context.source_root().display(),
            mirror = %self.context.mirror_root().display(),
            "starting sync"
        );

        self.prune_manifest_against_mirror(&mut result)?;
        self.create_missing_mirror_files(&mut result)?;
        self.delete_mirror_files_absent_from_source(&mut result)?;

        info!(
            created = result.created,
            skipped = result.skipped,
            deleted_from_source = result.deleted_from_source,
            deleted_from_mirror = result.deleted_from_mirror,
            "sync complete"
        );

        Ok(result)
    }

    /// Phase A: a tracked file missing from the mirror was deleted there,
    /// so delete it from the source and stop tracking it
    fn prune_manifest_against_mirror(&self, result: &mut SyncResult) -> Result<()> {
        let mirror_root = self.context.mirror_root();
        if !Manifest::exists(mirror_root) {
            debug!("no manifest yet, nothing to prune");
            return Ok(());
        }

        let mut manifest = Manifest::load(mirror_root)?;
        let mirror_files = self.scanner.list(mirror_root)?;

        let removed_in_mirror: Vec<String> = manifest
            .paths()
            .filter(|path| !mirror_files.contains(path))
            .map(str::to_owned)
            .collect();

        if removed_in_mirror.is_empty() {
            return Ok(());
        }

        for rel_path in &removed_in_mirror {
            if remove_file_if_exists(&self.context.source_path(rel_path))? {
                result.deleted_from_source += 1;
            }
            manifest.remove(rel_path);
            debug!(path = %rel_path, "deleted in mirror, removed from source");
        }

        manifest.save(mirror_root)?;
        info!(count = removed_in_mirror.len(), "pruned manifest against mirror");

        Ok(())
    }

    /// Phase B: give every source file a mirror counterpart
    ///
    /// Files already present in the mirror are left alone and stay
    /// untracked. The manifest is saved after each new file so that an
    /// interrupted run still describes the mirror correctly.
    fn create_missing_mirror_files(&self, result: &mut SyncResult) -> Result<()> {
        let mirror_root = self.context.mirror_root();
        let source_files = self.scanner.list(self.context.source_root())?;
        let mut manifest = Manifest::load(mirror_root)?;

        for rel_path in source_files.iter() {
            let dest = self.context.mirror_path(rel_path);
            if path_occupied(&dest) {
                result.skipped += 1;
                continue;
            }

            let kind = self
                .context
                .materializer()
                .materialize(&self.context.source_path(rel_path), &dest)?;

            // Track only once the file exists, otherwise the next phase A
            // would read the gap as a mirror-side deletion
            manifest.push(ManifestEntry::new(rel_path));
            manifest.save(mirror_root)?;

            result.created += 1;
            if kind == Materialized::Thumbnail {
                result.thumbnails += 1;
            }
            debug!(path = %rel_path, ?kind, "created in mirror");
        }

        Ok(())
    }

    /// Phase C: the mirror holds nothing the source does not have
    ///
    /// Untracked files are deleted too; the manifest only decides whether
    /// an entry has to be dropped.
    fn delete_mirror_files_absent_from_source(&self, result: &mut SyncResult) -> Result<()> {
        let mirror_root = self.context.mirror_root();
        let mirror_files = self.scanner.list(mirror_root)?;
        let source_files = self.scanner.list(self.context.source_root())?;

        let absent_from_source = mirror_files.difference(&source_files);
        if absent_from_source.is_empty() {
            return Ok(());
        }

        // An absent manifest means nothing was tracked
        let mut manifest = Manifest::load(mirror_root)?;
        let mut manifest_changed = false;

        for rel_path in &absent_from_source {
            if remove_file_if_exists(&self.context.mirror_path(rel_path))? {
                result.deleted_from_mirror += 1;
            }

            if manifest.remove(rel_path) {
                manifest_changed = true;
            } else {
                result.untracked_removed += 1;
            }
            debug!(path = %rel_path, "absent from source, removed from mirror");
        }

        if manifest_changed {
            manifest.save(mirror_root)?;
        }
        info!(
            count = absent_from_source.len(),
            "removed mirror files absent from source"
        );

        Ok(())
    }
}
