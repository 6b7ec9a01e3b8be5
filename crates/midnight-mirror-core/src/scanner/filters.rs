//! File filtering for directory listings

use std::path::Path;

/// Exclusion filter applied to every listed file
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// File names excluded at any depth
    excluded_names: Vec<String>,
}

impl FileFilter {
    /// Create a filter that includes everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude files with this exact name, wherever they appear
    #[must_use]
    pub fn exclude_name(mut self, name: &str) -> Self {
        self.excluded_names.push(name.to_string());
        self
    }

    /// Check if a path should be part of a listing
    #[must_use]
    pub fn should_include(&self, path: &Path) -> bool {
        path.file_name().is_none_or(|name| {
            !self
                .excluded_names
                .iter()
                .any(|excluded| name == excluded.as_str())
        })
    }
}
