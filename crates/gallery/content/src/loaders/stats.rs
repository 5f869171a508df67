//! Stat block loader.

use std::collections::HashMap;
use std::path::Path;

use gallery_core::StatBlock;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One entry of the stats file. Other per-item fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub stats: StatBlock,
}

/// Loader for the optional `{ ID: { "stats": { .. } } }` file.
pub struct StatsLoader;

impl StatsLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<String, StatBlock>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<HashMap<String, StatBlock>> {
        let records: HashMap<String, StatsRecord> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats JSON: {}", e))?;

        Ok(records
            .into_iter()
            .map(|(id, record)| (id, record.stats))
            .collect())
    }
}
