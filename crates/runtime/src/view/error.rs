//! Rejections raised by view transitions.

use thiserror::Error;

use gallery_core::{ErrorSeverity, GalleryError, SelectionError, SortOrder};

/// A user action the view refused. The view is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("sorting by {0} needs stats, which are not loaded")]
    SortUnavailable(SortOrder),

    #[error("no {category} trait named `{value}`")]
    UnknownTrait { category: String, value: String },

    #[error("collection data is not loaded yet")]
    NotReady,
}

impl GalleryError for ViewError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Selection(err) => err.error_code(),
            Self::SortUnavailable(_) => "view.sort_unavailable",
            Self::UnknownTrait { .. } => "view.unknown_trait",
            Self::NotReady => "view.not_ready",
        }
    }
}
