//! Event payloads for each topic.

use bitflags::bitflags;

use gallery_core::{ItemId, SortOrder};

use crate::view::{Page, Revalidation, ViewMode};

bitflags! {
    /// Which parts of the rendered surface a transition invalidated.
    ///
    /// Renderers redraw only the flagged areas. `RESULTS` means the grid was
    /// reset: previously materialized cards are stale and the first page must
    /// be requested again.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderScope: u8 {
        /// Active collection reordered or replaced.
        const RESULTS    = 0b0000_0001;

        /// Results title, count or filter chips changed.
        const HEADER     = 0b0000_0010;

        /// Filter controls (checkbox states, counts) changed.
        const CONTROLS   = 0b0000_0100;

        /// Comparison tray changed.
        const COMPARISON = 0b0000_1000;

        /// The URL changed.
        const LOCATION   = 0b0001_0000;

        /// Sort or filter transition.
        const VIEW = Self::RESULTS.bits() | Self::HEADER.bits() | Self::LOCATION.bits();

        /// Everything changed (new corpus or restored location).
        const ALL = Self::RESULTS.bits()
                  | Self::HEADER.bits()
                  | Self::CONTROLS.bits()
                  | Self::COMPARISON.bits()
                  | Self::LOCATION.bits();
    }
}

impl RenderScope {
    /// Returns true if the grid must be rebuilt from the first page.
    pub fn resets_results(&self) -> bool {
        self.contains(Self::RESULTS)
    }
}

/// Events describing view transitions.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// View state changed.
    Changed {
        scope: RenderScope,
        mode: ViewMode,
        sort: SortOrder,
        /// Length of the active collection.
        total: usize,
        /// Current location, including the query.
        location: String,
    },

    /// A page of the active collection was materialized.
    PageReady(Page),

    /// A user action was refused; the view is unchanged.
    Rejected { code: &'static str, message: String },
}

/// Events related to loading collection data.
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// A fetch started. `refresh` is false for the initial load.
    LoadStarted { refresh: bool },

    /// A new catalog was installed.
    Loaded {
        items: usize,
        skipped: Vec<ItemId>,
        has_stats: bool,
        has_new_ids: bool,
        revalidation: Revalidation,
    },

    /// A fetch failed; previously loaded data is untouched.
    LoadFailed { message: String },
}
