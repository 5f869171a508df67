//! Data sources that produce [`CorpusSources`](gallery_core::CorpusSources).
//!
//! The runtime never reads files directly; it asks a [`DataSource`] for a
//! complete set of raw sources and builds a catalog from them. The
//! file-backed source is used by clients, the in-memory source by tests and
//! embedders that already hold the data.

mod error;
mod file;
mod memory;
mod traits;

pub use error::SourceError;
pub use file::FileDataSource;
pub use memory::StaticDataSource;
pub use traits::DataSource;
