//! Recursive file listing for source and mirror directories
//!
//! Both sides are listed the same way: every file below the base
//! directory, as a `/`-separated path relative to the base, sorted
//! lexicographically. The manifest file is never part of a listing, at any
//! depth and on either side.

mod filters;

use std::collections::BTreeSet;
use std::path::{Component, Path};

use anyhow::Context;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

pub use filters::FileFilter;

use crate::error::Result;
use crate::manifest::MANIFEST_FILE_NAME;

/// Sorted, deduplicated set of relative file paths under a base directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: BTreeSet<String>,
}

impl FileSet {
    /// Whether the set contains the given relative path
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Paths present in `self` but not in `other`, sorted
    #[must_use]
    pub fn difference(&self, other: &Self) -> Vec<String> {
        self.paths.difference(&other.paths).cloned().collect()
    }

    /// Iterate paths in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Directory lister
pub struct Scanner {
    filter: FileFilter,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner that excludes the manifest file
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: FileFilter::new().exclude_name(MANIFEST_FILE_NAME),
        }
    }

    /// List every regular file below `base`
    ///
    /// A missing base directory yields an empty set. Symlinks are not
    /// followed into directories, but a symlink that resolves to a file is
    /// listed under its own name. Entries whose names are not valid UTF-8
    /// cannot be recorded in the manifest and are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory tree cannot be traversed.
    pub fn list(&self, base: &Path) -> Result<FileSet> {
        if !base.exists() {
            return Ok(FileSet::default());
        }

        let mut paths = BTreeSet::new();

        for entry in WalkDir::new(base).follow_links(false) {
            let entry =
                entry.with_context(|| format!("Failed to read directory: {}", base.display()))?;

            if !is_listed_file(&entry) || !self.filter.should_include(entry.path()) {
                continue;
            }

            let rel_path = entry
                .path()
                .strip_prefix(base)
                .with_context(|| format!("Failed to strip prefix from {}", entry.path().display()))?;

            match to_relative_string(rel_path) {
                Some(rel) => {
                    paths.insert(rel);
                }
                None => warn!("Skipping non UTF-8 path: {}", entry.path().display()),
            }
        }

        Ok(FileSet { paths })
    }
}

/// Regular files, and symlinks whose target is a regular file
fn is_listed_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Join path components with `/` regardless of platform
///
/// Returns `None` if any component is not valid UTF-8.
fn to_relative_string(path: &Path) -> Option<String> {
    let parts = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn create_test_file(dir: &Path, rel_path: &str) {
        let path = dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "xxx").unwrap();
    }

    #[test]
    fn test_list_sorted_relative_paths() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), "subdir/foo.txt");
        create_test_file(tmp.path(), "foo.txt");
        create_test_file(tmp.path(), "a/b/c.png");

        let files = Scanner::new().list(tmp.path()).unwrap();
        let listed: Vec<&str> = files.iter().collect();

        assert_eq!(listed, vec!["a/b/c.png", "foo.txt", "subdir/foo.txt"]);
    }

    #[test]
    fn test_list_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("empty/nested")).unwrap();
        create_test_file(tmp.path(), "file.txt");

        let files = Scanner::new().list(tmp.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains("file.txt"));
    }

    #[test]
    fn test_list_excludes_manifest_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        create_test_file(tmp.path(), MANIFEST_FILE_NAME);
        create_test_file(tmp.path(), &format!("nested/{MANIFEST_FILE_NAME}"));
        create_test_file(tmp.path(), "kept.txt");

        let files = Scanner::new().list(tmp.path()).unwrap();

        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["kept.txt"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let files = Scanner::new().list(&tmp.path().join("nope")).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_difference() {
        let left: FileSet = ["a.txt", "b.txt", "c/d.txt"].into_iter().collect();
        let right: FileSet = ["b.txt"].into_iter().collect();

        assert_eq!(left.difference(&right), vec!["a.txt", "c/d.txt"]);
        assert!(right.difference(&left).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_includes_symlinked_files() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base");
        create_test_file(tmp.path(), "target.txt");
        create_test_file(tmp.path(), "linked_dir/inner.txt");
        fs::create_dir_all(&base).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("target.txt"), base.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("linked_dir"), base.join("dir_link")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.txt"), base.join("dangling.txt")).unwrap();

        let files = Scanner::new().list(&base).unwrap();

        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["link.txt"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"\xffname.txt")), "xxx").unwrap();
        create_test_file(tmp.path(), "plain.txt");

        let files = Scanner::new().list(tmp.path()).unwrap();

        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["plain.txt"]);
    }

    #[test]
    fn test_relative_string_uses_forward_slashes() {
        let rel = Path::new("a").join("b").join("c.txt");

        assert_eq!(to_relative_string(&rel).as_deref(), Some("a/b/c.txt"));
    }
}
