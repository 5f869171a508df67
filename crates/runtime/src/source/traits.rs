//! Data source contract.

use async_trait::async_trait;

use gallery_core::CorpusSources;

use super::error::Result;

/// Supplier of raw collection data.
///
/// Each call performs a fresh fetch. Implementations either return every
/// mandatory source or fail as a whole; optional sources are `None` when
/// they could not be read.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch images, traits and the optional sources.
    async fn fetch(&self) -> Result<CorpusSources>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        "data source".to_owned()
    }
}
