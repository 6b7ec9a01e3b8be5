//! Mirror file creation
//!
//! A mirror file is either a square thumbnail of a source image or a stub
//! holding a random token. Which one is decided by the source extension
//! alone, through a set-membership test against an allow-list.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::imageops::FilterType;
use tracing::debug;
use uuid::Uuid;

use crate::error::{MirrorError, Result};

/// Thumbnail edge length used when none is configured
pub const DEFAULT_RESIZE: u32 = 256;

/// Extensions treated as raster images by default
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["gif", "jpeg", "jpg", "png"];

/// Allow-list of image extensions, matched case-sensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageExtensions {
    extensions: BTreeSet<String>,
}

impl Default for ImageExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS.iter().copied())
    }
}

impl ImageExtensions {
    /// Build an allow-list from bare extensions (no leading dot)
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the path's extension is on the allow-list
    #[must_use]
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    /// Extensions in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

/// What was written to the mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// Square resized copy of a source image
    Thumbnail,
    /// Placeholder with random content
    Stub,
}

/// Creates mirror files from source files
#[derive(Debug, Clone)]
pub struct Materializer {
    images: ImageExtensions,
    resize: u32,
}

impl Materializer {
    /// Create a materializer producing `resize`×`resize` thumbnails
    #[must_use]
    pub const fn new(images: ImageExtensions, resize: u32) -> Self {
        Self { images, resize }
    }

    /// Write the mirror counterpart of `source` at `dest`
    ///
    /// Parent directories of `dest` are created as needed. A file standing
    /// where one of them belongs is reported as [`MirrorError::BlockedPath`];
    /// it is never replaced, so later runs fail the same way until it is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written, or if an image
    /// cannot be decoded or encoded.
    pub fn materialize(&self, source: &Path, dest: &Path) -> Result<Materialized> {
        if let Some(parent) = dest.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                if let Some(blocker) = find_blocker(parent) {
                    return Err(MirrorError::BlockedPath {
                        dest: dest.to_path_buf(),
                        blocker,
                    }
                    .into());
                }
                return Err(err)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()));
            }
        }

        if self.images.is_image(source) {
            self.write_thumbnail(source, dest)?;
            debug!(dest = %dest.display(), size = self.resize, "wrote thumbnail");
            Ok(Materialized::Thumbnail)
        } else {
            Self::write_stub(dest)?;
            debug!(dest = %dest.display(), "wrote stub");
            Ok(Materialized::Stub)
        }
    }

    /// Resize to an exact square; aspect ratio is not preserved
    fn write_thumbnail(&self, source: &Path, dest: &Path) -> Result<()> {
        let thumbnail_error = |source_err| MirrorError::Thumbnail {
            source_path: source.to_path_buf(),
            dest: dest.to_path_buf(),
            source: source_err,
        };

        let img = image::open(source).map_err(thumbnail_error)?;
        img.resize_exact(self.resize, self.resize, FilterType::Triangle)
            .save(dest)
            .map_err(thumbnail_error)?;

        Ok(())
    }

    fn write_stub(dest: &Path) -> Result<()> {
        fs::write(dest, Uuid::new_v4().to_string())
            .with_context(|| format!("Failed to write stub: {}", dest.display()))
    }
}

/// Nearest existing ancestor of `dir`, if it is not a directory
fn find_blocker(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .find(|p| p.symlink_metadata().is_ok())
        .filter(|p| !p.is_dir())
        .map(Path::to_path_buf)
}
