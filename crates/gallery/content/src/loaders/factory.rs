//! Content factory for assembling corpus sources from a data directory.

use std::path::{Path, PathBuf};

use gallery_core::{CorpusSources, DataFiles};
use tracing::{info, warn};

use crate::loaders::{ImageLoader, LoadResult, MetadataLoader, StatsLoader, TraitLoader};

/// Content factory that loads all collection data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── kamiImage.json      (mandatory)
/// ├── kamiTraits.json     (mandatory)
/// ├── kamiStats.json      (optional)
/// └── kamiMetadata.json   (optional)
/// ```
///
/// File names come from [`DataFiles`].
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
    files: DataFiles,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(data_dir, DataFiles::default())
    }

    pub fn with_files(data_dir: impl Into<PathBuf>, files: DataFiles) -> Self {
        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    /// Loads every source.
    ///
    /// Fails if the images or traits file is unreadable or malformed. The
    /// stats and metadata files degrade to `None` with a warning.
    pub fn load_sources(&self) -> LoadResult<CorpusSources> {
        let images = ImageLoader::load(&self.path(&self.files.images))?;
        info!(count = images.len(), "loaded images");

        let traits = TraitLoader::load(&self.path(&self.files.traits))?;
        info!(count = traits.len(), "loaded trait sets");

        let stats = match StatsLoader::load(&self.path(&self.files.stats)) {
            Ok(stats) => {
                info!(count = stats.len(), "loaded stat records");
                Some(stats)
            }
            Err(error) => {
                warn!(%error, "stats unavailable; stat sorting disabled");
                None
            }
        };

        let new_ids = match MetadataLoader::load(&self.path(&self.files.metadata)) {
            Ok(metadata) => {
                info!(count = metadata.new_ids.len(), "loaded new-ID metadata");
                Some(metadata.new_ids)
            }
            Err(error) => {
                warn!(%error, "metadata unavailable; new badges disabled");
                None
            }
        };

        Ok(CorpusSources {
            images,
            traits,
            stats,
            new_ids,
        })
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_mandatory(dir: &Path) {
        fs::write(dir.join("kamiImage.json"), r#"{"1": "a.png", "2": "b.png"}"#).unwrap();
        fs::write(
            dir.join("kamiTraits.json"),
            r#"{"1": {"body": "red"}, "2": {"body": "blue"}}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(factory.files().stats, "kamiStats.json");
    }

    #[test]
    fn optional_files_degrade() {
        let dir = tempfile::tempdir().unwrap();
        write_mandatory(dir.path());
        fs::write(dir.path().join("kamiStats.json"), "not json").unwrap();

        let sources = ContentFactory::new(dir.path()).load_sources().unwrap();
        assert_eq!(sources.images.len(), 2);
        assert_eq!(sources.traits.len(), 2);
        assert!(sources.stats.is_none());
        assert!(sources.new_ids.is_none());
    }

    #[test]
    fn all_sources_load() {
        let dir = tempfile::tempdir().unwrap();
        write_mandatory(dir.path());
        fs::write(
            dir.path().join("kamiStats.json"),
            r#"{"1": {"stats": {"health": 3}}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("kamiMetadata.json"), r#"{"newKamiIds": [2]}"#).unwrap();

        let sources = ContentFactory::new(dir.path()).load_sources().unwrap();
        assert_eq!(sources.stats.unwrap()["1"].health, 3);
        assert_eq!(sources.new_ids, Some(vec![2]));
    }

    #[test]
    fn missing_mandatory_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kamiImage.json"), "{}").unwrap();

        let err = ContentFactory::new(dir.path()).load_sources().unwrap_err();
        assert!(err.to_string().contains("kamiTraits.json"));
    }

    #[test]
    fn custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("img.json"), r#"{"5": "e.png"}"#).unwrap();
        fs::write(dir.path().join("tr.json"), r#"{"5": {}}"#).unwrap();
        let files = DataFiles {
            images: "img.json".into(),
            traits: "tr.json".into(),
            ..DataFiles::default()
        };

        let sources = ContentFactory::with_files(dir.path(), files)
            .load_sources()
            .unwrap();
        assert!(sources.traits.contains_key("5"));
    }
}
