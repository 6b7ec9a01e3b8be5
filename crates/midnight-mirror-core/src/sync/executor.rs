//! Filesystem primitives used by the reconciliation phases

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use crate::error::Result;

/// Delete a file, tolerating one that is already gone
///
/// Returns whether a file was actually removed.
///
/// # Errors
///
/// Returns an error for any failure other than the file being absent.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "already absent, nothing to delete");
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to delete file: {}", path.display())),
    }
}

/// Whether anything occupies `path`, without following a final symlink
#[must_use]
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_existing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(remove_file_if_exists(&file).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_absent_file_is_tolerated() {
        let tmp = TempDir::new().unwrap();

        assert!(!remove_file_if_exists(&tmp.path().join("missing.txt")).unwrap());
    }

    #[test]
    fn test_remove_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dir");
        fs::create_dir(&dir).unwrap();

        assert!(remove_file_if_exists(&dir).is_err());
    }

    #[test]
    fn test_path_occupied() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");

        assert!(!path_occupied(&file));
        fs::write(&file, "x").unwrap();
        assert!(path_occupied(&file));
        assert!(path_occupied(tmp.path()));
    }
}
