//! Collection metadata loader.

use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Collection metadata. Only the new-ID list is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionMetadata {
    #[serde(rename = "newKamiIds", default)]
    pub new_ids: Vec<u64>,
}

/// Loader for the optional metadata file.
pub struct MetadataLoader;

impl MetadataLoader {
    pub fn load(path: &Path) -> LoadResult<CollectionMetadata> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CollectionMetadata> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse metadata JSON: {}", e))
    }
}
