//! Common error infrastructure for gallery-core.
//!
//! Every error surfaced by the gallery is classified by [`ErrorSeverity`] so
//! presentation layers can decide whether to show it as a rejected action, a
//! silently degraded feature, or a diagnostic that replaces the results area.

use crate::item::ItemId;

/// Severity level of an error, used to pick a handling strategy.
///
/// - **Validation**: the user asked for something that cannot be done
///   (unknown ID, duplicate selection). No state changes.
/// - **Degraded**: an optional data source is missing; the related feature is
///   disabled and the error is only logged.
/// - **Fatal**: a mandatory data source is unreadable; the previous corpus is
///   kept and a diagnostic is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Degraded,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Degraded => "degraded",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the error should be shown to the user.
    pub const fn is_user_visible(&self) -> bool {
        matches!(self, Self::Validation | Self::Fatal)
    }
}

/// Common trait for gallery errors.
pub trait GalleryError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Rejections raised by ID search and the comparison set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please enter a Kamigotchi ID")]
    EmptyId,

    #[error("Kamigotchi #{0} not found. Please check the ID and try again.")]
    NotFound(ItemId),

    #[error("Kamigotchi #{0} is already added!")]
    AlreadySelected(ItemId),
}

impl GalleryError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId => "selection.empty_id",
            Self::NotFound(_) => "selection.not_found",
            Self::AlreadySelected(_) => "selection.already_selected",
        }
    }
}

/// Raised when a sort-order name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order `{0}`")]
pub struct ParseSortError(pub String);

impl GalleryError for ParseSortError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "sort.unknown"
    }
}
