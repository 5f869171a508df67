//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, data sources and rejected view
//! transitions so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use gallery_core::{ErrorSeverity, GalleryError};

pub use crate::source::SourceError;
pub use crate::view::ViewError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("gallery worker command channel closed")]
    CommandChannelClosed,

    #[error("gallery worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("gallery worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a data source to be configured before building")]
    MissingSource,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl GalleryError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::View(err) => err.severity(),
            Self::Source(err) => err.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "runtime.command_channel_closed",
            Self::ReplyChannelClosed(_) => "runtime.reply_channel_closed",
            Self::WorkerJoin(_) => "runtime.worker_join",
            Self::MissingSource => "runtime.missing_source",
            Self::Source(err) => err.error_code(),
            Self::View(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::{ItemId, SelectionError};

    #[test]
    fn view_rejections_keep_their_severity() {
        let err = RuntimeError::from(ViewError::from(SelectionError::AlreadySelected(
            ItemId::from("9"),
        )));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "selection.already_selected");
        assert_eq!(err.to_string(), "Kamigotchi #9 is already added!");
    }

    #[test]
    fn load_failures_are_fatal() {
        let err = RuntimeError::from(SourceError::Load("missing kamiTraits.json".into()));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_user_visible());
    }
}
