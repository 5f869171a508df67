//! Error types raised by data source implementations.

use thiserror::Error;

use gallery_core::{ErrorSeverity, GalleryError};

/// Errors surfaced by data source implementations.
///
/// Only mandatory sources produce errors; optional sources degrade inside the
/// loader and never reach this type.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to load collection data: {0}")]
    Load(String),

    #[error("data source task failed")]
    Join(#[source] tokio::task::JoinError),
}

impl GalleryError for SourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Load(_) => "source.load",
            Self::Join(_) => "source.join",
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
