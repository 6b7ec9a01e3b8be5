//! Configuration validation and error reporting

use image::ImageFormat;

use super::types::Config;
use crate::error::{MirrorError, Result};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(resize) = config.resize {
            Self::validate_resize(resize)?;
        }

        if let Some(extensions) = &config.image_extensions {
            if extensions.is_empty() {
                anyhow::bail!("image_extensions cannot be empty");
            }

            for ext in extensions {
                let trimmed = ext.trim();
                if trimmed.is_empty()
                    || trimmed != ext
                    || ext.starts_with('.')
                    || ext.contains(['/', '\\'])
                {
                    return Err(MirrorError::InvalidImageExtension(ext.clone()).into());
                }
                if !has_thumbnail_codec(ext) {
                    return Err(MirrorError::UnsupportedImageExtension(ext.clone()).into());
                }
            }
        }

        Ok(())
    }

    /// Thumbnails need at least one pixel per side
    ///
    /// # Errors
    ///
    /// Returns an error if `resize` is zero.
    pub fn validate_resize(resize: u32) -> Result<()> {
        if resize == 0 {
            return Err(MirrorError::InvalidResize(resize).into());
        }
        Ok(())
    }
}

/// Thumbnails are decoded and re-encoded in the same format
fn has_thumbnail_codec(ext: &str) -> bool {
    ImageFormat::from_extension(ext)
        .is_some_and(|format| format.reading_enabled() && format.writing_enabled())
}
