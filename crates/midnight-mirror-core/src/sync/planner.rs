//! Side-effect free preview of a sync run

use super::context::SyncContext;
use super::executor::path_occupied;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::scanner::{FileSet, Scanner};

/// What a sync would do, path by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Tracked files deleted in the mirror, to be deleted from source (phase A)
    pub source_deletions: Vec<String>,
    /// Source files without a mirror counterpart, to be created (phase B)
    pub mirror_creations: Vec<String>,
    /// Mirror files without a source counterpart, to be deleted (phase C)
    pub mirror_deletions: Vec<String>,
}

impl SyncPlan {
    /// Whether the directories are already in sync
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source_deletions.is_empty()
            && self.mirror_creations.is_empty()
            && self.mirror_deletions.is_empty()
    }

    /// Number of planned file operations
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.source_deletions.len() + self.mirror_creations.len() + self.mirror_deletions.len()
    }
}

/// Combine the three inputs of a run into a plan
///
/// Mirrors the phase order of the reconciler: source deletions shrink the
/// source before creations and mirror deletions are derived from it.
#[must_use]
pub fn plan(source: &FileSet, mirror: &FileSet, manifest: &Manifest) -> SyncPlan {
    let mut source_deletions: Vec<String> = manifest
        .paths()
        .filter(|path| !mirror.contains(path))
        .map(str::to_owned)
        .collect();
    source_deletions.sort();
    source_deletions.dedup();

    let remaining_source: FileSet = source
        .iter()
        .filter(|path| source_deletions.binary_search_by(|d| d.as_str().cmp(*path)).is_err())
        .collect();

    SyncPlan {
        mirror_creations: remaining_source.difference(mirror),
        mirror_deletions: mirror.difference(&remaining_source),
        source_deletions,
    }
}

/// Reads the current disk state and plans against it
pub struct Planner {
    scanner: Scanner,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    /// Create a planner
    #[must_use]
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
        }
    }

    /// Plan a sync of `context` without touching disk
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be listed or the manifest is unreadable.
    pub fn preview(&self, context: &SyncContext) -> Result<SyncPlan> {
        let source = self.scanner.list(context.source_root())?;
        let mirror = self.scanner.list(context.mirror_root())?;
        let manifest = Manifest::load(context.mirror_root())?;

        let mut plan = plan(&source, &mirror, &manifest);
        // Phase B skips anything standing at the destination, listed or not
        plan.mirror_creations.retain(|path| !path_occupied(&context.mirror_path(path)));

        Ok(plan)
    }
}
