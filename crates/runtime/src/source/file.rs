//! File-backed data source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use gallery_content::ContentFactory;
use gallery_core::{CorpusSources, DataFiles};

use super::error::{Result, SourceError};
use super::traits::DataSource;

/// Reads the collection files from a data directory on every fetch.
///
/// Loading runs on the blocking pool so the worker task is never stalled by
/// file I/O or JSON parsing.
#[derive(Clone, Debug)]
pub struct FileDataSource {
    factory: ContentFactory,
}

impl FileDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            factory: ContentFactory::new(data_dir),
        }
    }

    pub fn with_files(data_dir: impl Into<PathBuf>, files: DataFiles) -> Self {
        Self {
            factory: ContentFactory::with_files(data_dir, files),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.factory.data_dir()
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self) -> Result<CorpusSources> {
        let factory = self.factory.clone();
        tokio::task::spawn_blocking(move || factory.load_sources())
            .await
            .map_err(SourceError::Join)?
            .map_err(|err| SourceError::Load(format!("{err:#}")))
    }

    fn describe(&self) -> String {
        format!("files in {}", self.data_dir().display())
    }
}
