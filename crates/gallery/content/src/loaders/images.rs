//! Image URL loader.

use std::collections::HashMap;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};

/// Loader for the ID → image URL mapping.
pub struct ImageLoader;

impl ImageLoader {
    /// Load image URLs from a JSON object keyed by item ID.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, String>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HashMap<String, String>> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse image JSON: {}", e))
    }
}
