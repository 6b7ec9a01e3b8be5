//! Configuration types and structures

use serde::{Deserialize, Serialize};

use crate::materializer::{DEFAULT_RESIZE, ImageExtensions};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Thumbnail edge length in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize: Option<u32>,

    /// Extensions (without leading dot) that get thumbnails instead of stubs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_extensions: Option<Vec<String>>,
}

impl Config {
    /// Configured thumbnail size, or the built-in default
    #[must_use]
    pub fn resize_or_default(&self) -> u32 {
        self.resize.unwrap_or(DEFAULT_RESIZE)
    }

    /// Configured image allow-list, or the built-in default
    #[must_use]
    pub fn image_extensions(&self) -> ImageExtensions {
        self.image_extensions
            .as_ref()
            .map_or_else(ImageExtensions::default, |exts| {
                ImageExtensions::new(exts.iter().cloned())
            })
    }

    /// Fill every field set in `other`, keeping the rest
    pub fn override_with(&mut self, other: Self) {
        if other.resize.is_some() {
            self.resize = other.resize;
        }
        if other.image_extensions.is_some() {
            self.image_extensions = other.image_extensions;
        }
    }
}
