//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or data sources.

pub mod errors;
pub mod handle;
pub mod snapshot;

pub use errors::{Result, RuntimeError};
pub use handle::GalleryHandle;
pub use snapshot::{LoadReport, RefreshOutcome, ViewSnapshot};
