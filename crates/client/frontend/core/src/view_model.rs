//! View-model snapshots derived from a [`ViewSnapshot`].
//!
//! These are the data contract between the runtime and any renderer: the
//! runtime owns state, the view models own presentation rules (titles,
//! labels, number formatting).
mod card;
mod comparison;
mod controls;
mod header;

pub use card::{CardView, TraitLine, capitalize, shows_affinity};
pub use comparison::ComparisonTray;
pub use controls::{FilterControls, FilterGroupView, FilterOption, NO_MATCHING_TRAITS};
pub use header::{FILTERED_TITLE, FilterChip, NO_MATCHES_TEXT, ResultsHeader, UNFILTERED_TITLE};

use gallery_runtime::ViewSnapshot;

use crate::message::{MessageEntry, MessageLog};

/// Everything a renderer needs to draw the gallery once.
#[derive(Clone, Debug)]
pub struct GalleryFrame {
    pub header: ResultsHeader,
    /// Cards materialized so far, in active order.
    pub cards: Vec<CardView>,
    pub comparison: ComparisonTray,
    pub messages: Vec<MessageEntry>,
    /// Replaces the results area when set.
    pub load_error: Option<String>,
    pub loading: bool,
    pub location: String,
}

impl GalleryFrame {
    pub fn from_snapshot(
        snapshot: &ViewSnapshot,
        messages: &MessageLog,
        message_limit: usize,
    ) -> Self {
        let cards = snapshot
            .visible
            .iter()
            .filter_map(|id| snapshot.catalog.item(id))
            .map(|item| CardView::build(&snapshot.catalog, item, snapshot.sort, false))
            .collect();

        // A failed refresh keeps the previous data on screen.
        let load_error = if snapshot.ready {
            None
        } else {
            snapshot.load_error.clone()
        };

        Self {
            header: ResultsHeader::from_snapshot(snapshot),
            cards,
            comparison: ComparisonTray::from_snapshot(snapshot),
            messages: collect_messages(messages, message_limit),
            load_error,
            loading: snapshot.loading,
            location: snapshot.location.clone(),
        }
    }
}

fn collect_messages(log: &MessageLog, limit: usize) -> Vec<MessageEntry> {
    let mut messages: Vec<_> = log.recent(limit).cloned().collect();
    messages.reverse();
    messages
}
