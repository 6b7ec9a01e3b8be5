//! Resolved, immutable inputs of a sync run

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{Config, ConfigValidator};
use crate::error::{MirrorError, Result};
use crate::materializer::Materializer;

/// Caller-facing options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Authoritative directory
    pub source: PathBuf,
    /// Directory kept in sync with `source`
    pub mirror: PathBuf,
    /// Thumbnail edge length, overriding the configured one
    pub resize: Option<u32>,
}

impl SyncOptions {
    /// Options with the configured thumbnail size
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, mirror: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mirror: mirror.into(),
            resize: None,
        }
    }

    /// Override the thumbnail size
    #[must_use]
    pub const fn with_resize(mut self, resize: u32) -> Self {
        self.resize = Some(resize);
        self
    }
}

/// Everything a run needs, resolved once and shared read-only by every phase
#[derive(Debug, Clone)]
pub struct SyncContext {
    source_root: PathBuf,
    mirror_root: PathBuf,
    resize: u32,
    materializer: Materializer,
}

impl SyncContext {
    /// Resolve both roots to absolute paths and settle the thumbnail settings
    ///
    /// The source must be an existing directory. The mirror may not exist
    /// yet; it is created by the first write. Resolving never touches disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing, the mirror is not a
    /// directory, the roots overlap, or the thumbnail settings are invalid.
    pub fn resolve(options: &SyncOptions, config: &Config) -> Result<Self> {
        ConfigValidator::validate(config)?;

        if !options.source.is_dir() {
            return Err(MirrorError::SourceMissing(options.source.clone()).into());
        }

        let source_root = dunce::canonicalize(&options.source).with_context(|| {
            format!("Failed to resolve source directory: {}", options.source.display())
        })?;
        let mirror_root = resolve_mirror(&options.mirror)?;

        if source_root.starts_with(&mirror_root) || mirror_root.starts_with(&source_root) {
            anyhow::bail!(
                "Source and mirror must not overlap: {} <-> {}",
                source_root.display(),
                mirror_root.display()
            );
        }

        let resize = options.resize.unwrap_or_else(|| config.resize_or_default());
        ConfigValidator::validate_resize(resize)?;

        Ok(Self {
            source_root,
            mirror_root,
            resize,
            materializer: Materializer::new(config.image_extensions(), resize),
        })
    }

    /// Absolute source root
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Absolute mirror root
    #[must_use]
    pub fn mirror_root(&self) -> &Path {
        &self.mirror_root
    }

    /// Thumbnail edge length
    #[must_use]
    pub const fn resize(&self) -> u32 {
        self.resize
    }

    /// Stub/thumbnail writer for this run
    #[must_use]
    pub const fn materializer(&self) -> &Materializer {
        &self.materializer
    }

    /// Source-side location of a relative path
    #[must_use]
    pub fn source_path(&self, rel_path: &str) -> PathBuf {
        self.source_root.join(rel_path)
    }

    /// Mirror-side location of a relative path
    #[must_use]
    pub fn mirror_path(&self, rel_path: &str) -> PathBuf {
        self.mirror_root.join(rel_path)
    }
}

/// Canonicalize an existing mirror, otherwise make it absolute lexically
///
/// Whatever exists of the mirror path must be a directory.
fn resolve_mirror(mirror: &Path) -> Result<PathBuf> {
    if mirror.exists() {
        if !mirror.is_dir() {
            return Err(MirrorError::MirrorNotDirectory(mirror.to_path_buf()).into());
        }
        return dunce::canonicalize(mirror)
            .with_context(|| format!("Failed to resolve mirror directory: {}", mirror.display()));
    }

    let absolute = std::path::absolute(mirror)
        .with_context(|| format!("Failed to resolve mirror directory: {}", mirror.display()))?;

    // Canonicalize the deepest existing ancestor so overlap checks compare like with like
    let existing = absolute
        .ancestors()
        .find(|p| p.exists())
        .unwrap_or(absolute.as_path());
    if !existing.is_dir() {
        return Err(MirrorError::MirrorNotDirectory(existing.to_path_buf()).into());
    }
    let suffix = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
    let base = dunce::canonicalize(existing)
        .with_context(|| format!("Failed to resolve directory: {}", existing.display()))?;

    Ok(base.join(suffix))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::materializer::DEFAULT_RESIZE;

    #[test]
    fn test_resolve_absolute_roots() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();

        let options = SyncOptions::new(&source, tmp.path().join("not/yet/mirror"));
        let ctx = SyncContext::resolve(&options, &Config::default()).unwrap();

        assert!(ctx.source_root().is_absolute());
        assert!(ctx.mirror_root().is_absolute());
        assert!(ctx.mirror_root().ends_with("not/yet/mirror"));
        assert!(!ctx.mirror_root().exists());
        assert_eq!(ctx.resize(), DEFAULT_RESIZE);
    }

    #[test]
    fn test_resolve_missing_source() {
        let tmp = TempDir::new().unwrap();
        let options = SyncOptions::new(tmp.path().join("nope"), tmp.path().join("mirror"));

        let err = SyncContext::resolve(&options, &Config::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MirrorError>(),
            Some(MirrorError::SourceMissing(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_nested_roots() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();

        let nested = SyncOptions::new(&source, source.join("mirror"));
        assert!(SyncContext::resolve(&nested, &Config::default()).is_err());

        let same = SyncOptions::new(&source, &source);
        assert!(SyncContext::resolve(&same, &Config::default()).is_err());
    }

    #[test]
    fn test_resize_option_overrides_config() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();
        let config = Config {
            resize: Some(100),
            ..Config::default()
        };

        let options = SyncOptions::new(&source, tmp.path().join("mirror"));
        assert_eq!(SyncContext::resolve(&options, &config).unwrap().resize(), 100);

        let options = options.with_resize(42);
        assert_eq!(SyncContext::resolve(&options, &config).unwrap().resize(), 42);

        let options = SyncOptions::new(&source, tmp.path().join("mirror")).with_resize(0);
        assert!(SyncContext::resolve(&options, &config).is_err());
    }

    #[test]
    fn test_resolve_rejects_file_as_mirror() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();
        let file = tmp.path().join("mirror.txt");
        fs::write(&file, "not a directory").unwrap();

        for mirror in [file.clone(), file.join("nested")] {
            let options = SyncOptions::new(&source, &mirror);
            let err = SyncContext::resolve(&options, &Config::default()).unwrap_err();

            assert!(matches!(
                err.downcast_ref::<MirrorError>(),
                Some(MirrorError::MirrorNotDirectory(path)) if *path == file
            ));
        }
        assert_eq!(fs::read_to_string(&file).unwrap(), "not a directory");
    }

    #[test]
    fn test_resolve_validates_config() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        fs::create_dir(&source).unwrap();
        let config = Config {
            image_extensions: Some(vec!["webp".to_string()]),
            ..Config::default()
        };

        let options = SyncOptions::new(&source, tmp.path().join("mirror"));
        let err = SyncContext::resolve(&options, &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MirrorError>(),
            Some(MirrorError::UnsupportedImageExtension(_))
        ));
    }
}
