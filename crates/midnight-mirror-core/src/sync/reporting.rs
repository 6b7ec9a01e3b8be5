//! Sync operation reporting and statistics

use std::fmt::Write;

use super::SyncResult;
use super::planner::SyncPlan;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report of a completed run
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Created:             {}", result.created);
        let _ = writeln!(output, "  Thumbnails:        {}", result.thumbnails);
        let _ = writeln!(output, "Skipped:             {}", result.skipped);
        let _ = writeln!(output, "Deleted from source: {}", result.deleted_from_source);
        let _ = writeln!(output, "Deleted from mirror: {}", result.deleted_from_mirror);
        let _ = writeln!(output, "  Untracked:         {}", result.untracked_removed);

        let _ = write!(
            output,
            "\nTotal operations: {}\n",
            result.total_operations()
        );

        output
    }

    /// Generate a report of what a run would do
    #[must_use]
    pub fn generate_plan(plan: &SyncPlan) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Status ===\n");

        if plan.is_empty() {
            output.push_str("Mirror is in sync with source\n");
            return output;
        }

        Self::push_section(&mut output, "Delete from source", &plan.source_deletions);
        Self::push_section(&mut output, "Create in mirror", &plan.mirror_creations);
        Self::push_section(&mut output, "Delete from mirror", &plan.mirror_deletions);

        let _ = write!(output, "\nPending operations: {}\n", plan.change_count());

        output
    }

    fn push_section(output: &mut String, title: &str, paths: &[String]) {
        if paths.is_empty() {
            return;
        }

        let _ = writeln!(output, "{title} ({}):", paths.len());
        for path in paths {
            let _ = writeln!(output, "  - {path}");
        }
    }
}
