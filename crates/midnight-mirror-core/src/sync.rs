//! Three-phase reconciliation engine
//!
//! A run combines the source listing, the mirror listing and the manifest:
//! - phase A deletes from source what was deleted from the mirror,
//! - phase B creates in the mirror what only exists in source,
//! - phase C deletes from the mirror what no longer exists in source.

mod context;
mod executor;
mod orchestrator;
mod planner;
mod reporting;

pub use context::{SyncContext, SyncOptions};
pub use orchestrator::Reconciler;
pub use planner::{Planner, SyncPlan, plan};
pub use reporting::SyncReporter;

use crate::config::Config;
use crate::error::Result;

/// Synchronization result with statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Mirror files created
    pub created: usize,
    /// Created mirror files that are thumbnails
    pub thumbnails: usize,
    /// Source files whose mirror path was already occupied
    pub skipped: usize,
    /// Source files deleted because their tracked mirror file was deleted
    pub deleted_from_source: usize,
    /// Mirror files deleted because their source file is gone
    pub deleted_from_mirror: usize,
    /// Deleted mirror files that were never tracked in the manifest
    pub untracked_removed: usize,
}

impl SyncResult {
    /// Total operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.created + self.deleted_from_source + self.deleted_from_mirror
    }
}

/// Resolve `options` against `config` and run one synchronization pass
///
/// # Errors
///
/// Returns an error if the directories cannot be resolved or any phase fails.
pub fn sync(options: &SyncOptions, config: &Config) -> Result<SyncResult> {
    let context = SyncContext::resolve(options, config)?;
    Reconciler::new(context).sync()
}
