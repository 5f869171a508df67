//! Gallery configuration loader.

use std::path::Path;

use gallery_core::GalleryConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for gallery configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<GalleryConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Like [`ConfigLoader::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<GalleryConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(GalleryConfig::default())
        }
    }

    pub fn parse(content: &str) -> LoadResult<GalleryConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
