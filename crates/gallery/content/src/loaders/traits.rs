//! Trait assignment loader.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use gallery_core::TraitValue;

use crate::loaders::{LoadResult, read_file};

/// Per-item trait assignments: ID → category → value.
pub type TraitAssignments = HashMap<String, BTreeMap<String, TraitValue>>;

/// Loader for trait assignments.
///
/// Values may be bare names or `{ name, affinity?, stats? }` records; both
/// deserialize into [`TraitValue`].
pub struct TraitLoader;

impl TraitLoader {
    pub fn load(path: &Path) -> LoadResult<TraitAssignments> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TraitAssignments> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse trait JSON: {}", e))
    }
}
