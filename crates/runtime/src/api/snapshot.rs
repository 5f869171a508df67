//! Read-only values handed to clients.

use std::sync::Arc;

use gallery_core::{Catalog, ItemId, SortOrder, TraitFilter};

use crate::view::{Revalidation, ViewMode};

/// Result of asking for a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch was started.
    Started,
    /// A fetch was already in flight; nothing was queued.
    AlreadyRunning,
}

/// Summary of a completed load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub items: usize,
    pub skipped: usize,
    pub has_stats: bool,
    pub has_new_ids: bool,
    pub revalidation: Revalidation,
}

/// Point-in-time copy of the view state for rendering.
///
/// The catalog is shared, not copied; it always belongs to the same load as
/// the orders in the snapshot.
#[derive(Clone, Debug)]
pub struct ViewSnapshot {
    pub catalog: Arc<Catalog>,
    pub ready: bool,
    pub loading: bool,
    pub mode: ViewMode,
    pub sort: SortOrder,
    pub default_sort: SortOrder,
    pub filter: TraitFilter,
    /// Length of the active collection.
    pub total: usize,
    /// IDs materialized so far, in active order.
    pub visible: Vec<ItemId>,
    /// Comparison IDs in ascending numeric order.
    pub comparison: Vec<ItemId>,
    pub location: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Diagnostic of the last failed load, cleared by a successful one.
    pub load_error: Option<String>,
}

impl ViewSnapshot {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.visible.len())
    }
}
