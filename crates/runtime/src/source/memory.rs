//! In-memory data source.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gallery_core::CorpusSources;

use super::error::{Result, SourceError};
use super::traits::DataSource;

/// Serves a replaceable snapshot of raw sources.
///
/// Clones share the snapshot, so a test can keep one clone, swap the data
/// or arm a failure, and observe the effect through a refresh.
#[derive(Clone, Debug, Default)]
pub struct StaticDataSource {
    inner: Arc<Mutex<Snapshot>>,
}

#[derive(Debug, Default)]
struct Snapshot {
    sources: CorpusSources,
    failure: Option<String>,
}

impl StaticDataSource {
    pub fn new(sources: CorpusSources) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Snapshot {
                sources,
                failure: None,
            })),
        }
    }

    /// Replaces the data served by subsequent fetches.
    pub fn replace(&self, sources: CorpusSources) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.sources = sources;
        }
    }

    /// Makes subsequent fetches fail with `message`, or succeed again on `None`.
    pub fn set_failure(&self, message: Option<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failure = message;
        }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self) -> Result<CorpusSources> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| SourceError::Load("in-memory source lock was poisoned".into()))?;
        match &inner.failure {
            Some(message) => Err(SourceError::Load(message.clone())),
            None => Ok(inner.sources.clone()),
        }
    }

    fn describe(&self) -> String {
        "in-memory sources".to_owned()
    }
}
