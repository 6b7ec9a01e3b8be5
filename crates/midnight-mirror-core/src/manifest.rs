//! Manifest store
//!
//! The manifest is a JSON array of `{ "path": "relative/path" }` records kept
//! at the mirror root. It lists the mirror files this tool created, which is
//! what lets a deletion on the mirror side be told apart from a file that was
//! simply never mirrored. Every mutation rewrites the whole document.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{MirrorError, Result};

/// File name of the manifest, reserved in every listing
pub const MANIFEST_FILE_NAME: &str = "mirror-manifest.json";

/// A mirror file created by the reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the mirror root, `/`-separated
    pub path: String,
}

impl ManifestEntry {
    /// Create an entry for a relative path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Ordered list of manifest entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Location of the manifest inside a mirror root
    #[must_use]
    pub fn path_in(mirror_root: &Path) -> PathBuf {
        mirror_root.join(MANIFEST_FILE_NAME)
    }

    /// Whether a manifest has been written to this mirror
    #[must_use]
    pub fn exists(mirror_root: &Path) -> bool {
        Self::path_in(mirror_root).is_file()
    }

    /// Load the manifest, or an empty one if none was written yet
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(mirror_root: &Path) -> Result<Self> {
        let path = Self::path_in(mirror_root);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let manifest: Self = serde_json::from_str(&content)
            .map_err(|source| MirrorError::CorruptManifest {
                path: path.clone(),
                source,
            })?;

        if let Some(entry) = manifest.paths().find(|p| !is_plain_relative(p)) {
            return Err(MirrorError::UnsafeManifestEntry {
                path,
                entry: entry.to_string(),
            }
            .into());
        }

        Ok(manifest)
    }

    /// Overwrite the manifest on disk
    ///
    /// The document is written to a temporary file in the mirror root and
    /// renamed over the previous manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be written.
    pub fn save(&self, mirror_root: &Path) -> Result<()> {
        let path = Self::path_in(mirror_root);

        fs::create_dir_all(mirror_root)
            .with_context(|| format!("Failed to create directory: {}", mirror_root.display()))?;

        let json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;

        let mut tmp = tempfile::NamedTempFile::new_in(mirror_root).with_context(|| {
            format!("Failed to create temporary file in {}", mirror_root.display())
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.write_all(b"\n"))
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to replace manifest: {}", path.display()))?;

        Ok(())
    }

    /// Append an entry unless its path is already tracked
    pub fn push(&mut self, entry: ManifestEntry) {
        if !self.contains(&entry.path) {
            self.entries.push(entry);
        }
    }

    /// Drop the entry for `path`, returning whether one was removed
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.path != path);
        self.entries.len() != before
    }

    /// Whether `path` is tracked
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Tracked paths in manifest order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Entries in manifest order
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of tracked paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entries are joined onto both roots, so they must not escape them
fn is_plain_relative(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

impl FromIterator<ManifestEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        let mut manifest = Self::default();
        for entry in iter {
            manifest.push(entry);
        }
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest_is_empty() {
        let tmp = TempDir::new().unwrap();

        assert!(!Manifest::exists(tmp.path()));
        let manifest = Manifest::load(tmp.path()).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = Manifest::default();
        manifest.push(ManifestEntry::new("foo.txt"));
        manifest.push(ManifestEntry::new("subdir/bar.png"));

        manifest.save(tmp.path()).unwrap();

        assert!(Manifest::exists(tmp.path()));
        let loaded = Manifest::load(tmp.path()).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.paths().collect::<Vec<_>>(), vec!["foo.txt", "subdir/bar.png"]);
    }

    #[test]
    fn test_file_format_is_array_of_path_records() {
        let tmp = TempDir::new().unwrap();
        let manifest: Manifest = [ManifestEntry::new("foo.txt")].into_iter().collect();
        manifest.save(tmp.path()).unwrap();

        let raw = fs::read_to_string(tmp.path().join(MANIFEST_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value, serde_json::json!([{ "path": "foo.txt" }]));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let tmp = TempDir::new().unwrap();
        let mut manifest: Manifest = [ManifestEntry::new("a.txt"), ManifestEntry::new("b.txt")]
            .into_iter()
            .collect();
        manifest.save(tmp.path()).unwrap();

        assert!(manifest.remove("a.txt"));
        manifest.save(tmp.path()).unwrap();

        let loaded = Manifest::load(tmp.path()).unwrap();
        assert_eq!(loaded.paths().collect::<Vec<_>>(), vec!["b.txt"]);
        // Only the manifest itself remains, no temporary files
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_push_is_unique_per_path() {
        let mut manifest = Manifest::default();
        manifest.push(ManifestEntry::new("foo.txt"));
        manifest.push(ManifestEntry::new("foo.txt"));

        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_remove_missing_path() {
        let mut manifest: Manifest = [ManifestEntry::new("foo.txt")].into_iter().collect();

        assert!(!manifest.remove("bar.txt"));
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_load_rejects_escaping_entries() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MANIFEST_FILE_NAME),
            r#"[{ "path": "ok.txt" }, { "path": "../outside.txt" }]"#,
        )
        .unwrap();

        let err = Manifest::load(tmp.path()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MirrorError>(),
            Some(MirrorError::UnsafeManifestEntry { entry, .. }) if entry == "../outside.txt"
        ));
    }

    #[test]
    fn test_plain_relative() {
        assert!(is_plain_relative("foo.txt"));
        assert!(is_plain_relative("a/b/c.png"));
        assert!(!is_plain_relative(""));
        assert!(!is_plain_relative("/etc/passwd"));
        assert!(!is_plain_relative("a/../b"));
    }

    #[test]
    fn test_load_corrupt_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE_NAME), "{ not json").unwrap();

        let err = Manifest::load(tmp.path()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MirrorError>(),
            Some(MirrorError::CorruptManifest { .. })
        ));
    }
}
