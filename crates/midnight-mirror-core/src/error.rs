use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Domain failures callers may want to match on
///
/// These are raised wrapped in `anyhow::Error`; use
/// `err.downcast_ref::<MirrorError>()` to inspect them.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The source directory does not exist or is not a directory
    #[error("Source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The mirror path exists but is not a directory
    #[error("Mirror path is not a directory: {}", .0.display())]
    MirrorNotDirectory(PathBuf),

    /// A file in the mirror occupies a directory needed for a nested path
    #[error("Cannot create {}: {} is a file, not a directory", .dest.display(), .blocker.display())]
    BlockedPath {
        /// Mirror file that could not be created
        dest: PathBuf,
        /// Existing file standing where a directory is needed
        blocker: PathBuf,
    },

    /// The manifest file exists but is not a valid JSON array of entries
    #[error("Corrupt manifest at {}", .path.display())]
    CorruptManifest {
        /// Manifest location
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// A manifest entry points outside the directory it is relative to
    #[error("Manifest at {} has an unsafe entry: {entry:?}", .path.display())]
    UnsafeManifestEntry {
        /// Manifest location
        path: PathBuf,
        /// Offending entry path
        entry: String,
    },

    /// An image could not be decoded, resized or encoded
    #[error("Failed to create thumbnail {} from {}", .dest.display(), .source_path.display())]
    Thumbnail {
        /// Source image
        source_path: PathBuf,
        /// Thumbnail destination
        dest: PathBuf,
        /// Underlying image failure
        #[source]
        source: image::ImageError,
    },

    /// Thumbnail dimension must be at least one pixel
    #[error("Invalid resize dimension: {0} (must be greater than zero)")]
    InvalidResize(u32),

    /// Image extensions are bare names like `png`
    #[error("Invalid image extension: {0:?}")]
    InvalidImageExtension(String),

    /// No thumbnail codec for this extension is compiled in
    #[error("Unsupported image extension: {0:?} (no codec available to read and write it)")]
    UnsupportedImageExtension(String),
}
