//! View state controller.
//!
//! Owns the sort order, trait filter, derived orders, pagination cursor and
//! comparison set for one catalog at a time. Every transition that reorders
//! or replaces the active collection resets the cursor and bumps the page
//! generation, which invalidates any page still being rendered.

use std::collections::BTreeSet;
use std::sync::Arc;

use gallery_core::{Catalog, Item, ItemId, SelectionError, SortOrder, TraitFilter, ViewConfig};

use super::error::ViewError;
use super::query::ViewQuery;
use crate::events::RenderScope;

/// Which list governs pagination and rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// No constraints; the active collection is every item.
    #[default]
    Unfiltered,
    /// Constraints with at least one match.
    Filtered,
    /// Constraints without matches. Nothing to paginate.
    NoMatches,
}

/// One materialized slice of the active collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Generation the page belongs to; pass it back to
    /// [`GalleryView::finish_page`] once rendered.
    pub generation: u64,
    /// Offset of the first ID in the active collection.
    pub start: usize,
    pub ids: Vec<ItemId>,
    /// Length of the active collection when the page was cut.
    pub total: usize,
}

impl Page {
    pub fn end(&self) -> usize {
        self.start + self.ids.len()
    }

    pub fn is_last(&self) -> bool {
        self.end() >= self.total
    }
}

/// State dropped while re-validating against a new catalog or a URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Revalidation {
    pub dropped_filters: Vec<(String, String)>,
    pub dropped_selection: Vec<ItemId>,
    /// Set when the sort order could not be kept.
    pub sort_reset: Option<SortOrder>,
}

impl Revalidation {
    pub fn is_empty(&self) -> bool {
        self.dropped_filters.is_empty()
            && self.dropped_selection.is_empty()
            && self.sort_reset.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Pagination {
    cursor: usize,
    in_flight: bool,
    generation: u64,
}

/// The gallery's view state.
#[derive(Clone, Debug)]
pub struct GalleryView {
    catalog: Arc<Catalog>,
    ready: bool,
    page_size: usize,
    default_sort: SortOrder,
    sort: SortOrder,
    filter: TraitFilter,
    mode: ViewMode,
    full_order: Vec<ItemId>,
    filtered_order: Vec<ItemId>,
    pagination: Pagination,
    comparison: BTreeSet<ItemId>,
}

impl GalleryView {
    /// Creates a view with no catalog. Until [`install`](Self::install) is
    /// called the view is not ready and rejects catalog-dependent actions.
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            catalog: Arc::new(Catalog::empty()),
            ready: false,
            page_size: config.effective_page_size(),
            default_sort: config.default_sort,
            sort: config.default_sort,
            filter: TraitFilter::new(),
            mode: ViewMode::Unfiltered,
            full_order: Vec::new(),
            filtered_order: Vec::new(),
            pagination: Pagination::default(),
            comparison: BTreeSet::new(),
        }
    }

    /// Swaps in a freshly built catalog, re-validates the retained filter,
    /// sort and comparison set against it and rebuilds the orders.
    pub fn install(&mut self, catalog: Arc<Catalog>) -> Revalidation {
        self.catalog = catalog;
        self.ready = true;
        let revalidation = self.revalidate();
        self.rebuild();
        revalidation
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn default_sort(&self) -> SortOrder {
        self.default_sort
    }

    pub fn filter(&self) -> &TraitFilter {
        &self.filter
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_filtering(&self) -> bool {
        self.mode == ViewMode::Filtered
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Every item in the current sort order.
    pub fn full_order(&self) -> &[ItemId] {
        &self.full_order
    }

    /// The list pagination and rendering read from.
    pub fn active_order(&self) -> &[ItemId] {
        match self.mode {
            ViewMode::Unfiltered => &self.full_order,
            ViewMode::Filtered => &self.filtered_order,
            ViewMode::NoMatches => &[],
        }
    }

    /// IDs materialized so far.
    pub fn visible(&self) -> &[ItemId] {
        let active = self.active_order();
        &active[..self.pagination.cursor.min(active.len())]
    }

    pub fn cursor(&self) -> usize {
        self.pagination.cursor.min(self.active_order().len())
    }

    pub fn remaining(&self) -> usize {
        self.active_order().len() - self.cursor()
    }

    pub fn generation(&self) -> u64 {
        self.pagination.generation
    }

    pub fn page_in_flight(&self) -> bool {
        self.pagination.in_flight
    }

    // ---------------------------------------------------------------------
    // Sort and filter
    // ---------------------------------------------------------------------

    pub fn set_sort(&mut self, order: SortOrder) -> Result<RenderScope, ViewError> {
        self.ensure_ready()?;
        if !self.catalog.supports(order) {
            return Err(ViewError::SortUnavailable(order));
        }
        self.sort = order;
        self.rebuild();
        Ok(RenderScope::VIEW)
    }

    /// Flips one constraint. Enabling a value the catalog has never seen is
    /// rejected.
    pub fn toggle_filter(&mut self, category: &str, value: &str) -> Result<RenderScope, ViewError> {
        self.ensure_ready()?;
        if !self.filter.contains(category, value)
            && !self.catalog.occurrences().contains(category, value)
        {
            return Err(ViewError::UnknownTrait {
                category: category.to_owned(),
                value: value.to_owned(),
            });
        }
        self.filter.toggle(category, value);
        self.rebuild();
        Ok(RenderScope::VIEW | RenderScope::CONTROLS)
    }

    /// Removes one constraint, as a filter chip does.
    pub fn remove_filter(&mut self, category: &str, value: &str) -> RenderScope {
        if !self.filter.remove(category, value) {
            return RenderScope::empty();
        }
        self.rebuild();
        RenderScope::VIEW | RenderScope::CONTROLS
    }

    pub fn clear_filters(&mut self) -> RenderScope {
        if self.filter.is_empty() {
            return RenderScope::empty();
        }
        self.filter.clear();
        self.rebuild();
        RenderScope::VIEW | RenderScope::CONTROLS
    }

    // ---------------------------------------------------------------------
    // Pagination
    // ---------------------------------------------------------------------

    /// Materializes the next page of the active collection.
    ///
    /// Returns `None` while a page is in flight or when the cursor is at the
    /// end. The caller renders the page and then calls
    /// [`finish_page`](Self::finish_page) to re-arm pagination.
    pub fn request_page(&mut self) -> Option<Page> {
        if self.pagination.in_flight {
            return None;
        }

        let active = self.active_order();
        let total = active.len();
        let start = self.pagination.cursor.min(total);
        if start >= total {
            return None;
        }
        let end = (start + self.page_size).min(total);
        let ids = active[start..end].to_vec();

        self.pagination.cursor = end;
        self.pagination.in_flight = true;

        Some(Page {
            generation: self.pagination.generation,
            start,
            ids,
            total,
        })
    }

    /// Re-arms pagination after a page was rendered. Completions from an
    /// older generation are ignored. Returns whether pagination was re-armed.
    pub fn finish_page(&mut self, generation: u64) -> bool {
        if generation != self.pagination.generation || !self.pagination.in_flight {
            return false;
        }
        self.pagination.in_flight = false;
        true
    }

    // ---------------------------------------------------------------------
    // Search and comparison
    // ---------------------------------------------------------------------

    /// Resolves a user-typed ID.
    pub fn lookup(&self, raw: &str) -> Result<&Item, ViewError> {
        self.ensure_ready()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptyId.into());
        }
        let id = ItemId::from(trimmed);
        self.catalog
            .item(&id)
            .ok_or_else(|| SelectionError::NotFound(id).into())
    }

    /// Pins an item for comparison.
    pub fn add_to_comparison(&mut self, raw: &str) -> Result<ItemId, ViewError> {
        let id = self.lookup(raw)?.id.clone();
        if self.comparison.contains(&id) {
            return Err(SelectionError::AlreadySelected(id).into());
        }
        self.comparison.insert(id.clone());
        Ok(id)
    }

    pub fn remove_from_comparison(&mut self, id: &ItemId) -> bool {
        self.comparison.remove(id)
    }

    pub fn clear_comparison(&mut self) -> bool {
        let changed = !self.comparison.is_empty();
        self.comparison.clear();
        changed
    }

    /// Pinned IDs in ascending numeric order, independent of the sort order.
    pub fn comparison(&self) -> &BTreeSet<ItemId> {
        &self.comparison
    }

    /// Pinned items in ascending numeric order.
    pub fn comparison_items(&self) -> impl Iterator<Item = &Item> {
        self.comparison.iter().filter_map(|id| self.catalog.item(id))
    }

    // ---------------------------------------------------------------------
    // URL state
    // ---------------------------------------------------------------------

    pub fn query(&self) -> ViewQuery {
        ViewQuery {
            filter: self.filter.clone(),
            sort: self.sort,
            selection: self.comparison.clone(),
        }
    }

    /// Encoded location for the current state.
    pub fn location(&self, path: &str) -> String {
        self.query().to_location(path, self.default_sort)
    }

    /// Replaces filters, sort and selection with the query's, dropping
    /// anything the catalog cannot resolve. Before the first install the
    /// query is only stored; install validates it.
    pub fn apply_query(&mut self, query: ViewQuery) -> Revalidation {
        self.filter = query.filter;
        self.sort = query.sort;
        self.comparison = query.selection;

        if !self.ready {
            return Revalidation::default();
        }
        let revalidation = self.revalidate();
        self.rebuild();
        revalidation
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn ensure_ready(&self) -> Result<(), ViewError> {
        if self.ready {
            Ok(())
        } else {
            Err(ViewError::NotReady)
        }
    }

    fn revalidate(&mut self) -> Revalidation {
        let catalog = Arc::clone(&self.catalog);
        let mut revalidation = Revalidation::default();

        self.filter.retain(|category, value| {
            let known = catalog.occurrences().contains(category, value);
            if !known {
                revalidation
                    .dropped_filters
                    .push((category.to_owned(), value.to_owned()));
            }
            known
        });

        self.comparison.retain(|id| {
            let known = catalog.corpus().contains(id);
            if !known {
                revalidation.dropped_selection.push(id.clone());
            }
            known
        });

        if !catalog.supports(self.sort) {
            revalidation.sort_reset = Some(self.sort);
            self.sort = if catalog.supports(self.default_sort) {
                self.default_sort
            } else {
                SortOrder::default()
            };
        }

        revalidation
    }

    /// Recomputes both orders from the catalog and resets pagination.
    fn rebuild(&mut self) {
        self.full_order = self.catalog.sorted_ids(self.sort);

        if self.filter.is_empty() {
            self.filtered_order.clear();
            self.mode = ViewMode::Unfiltered;
        } else {
            self.filtered_order = self.catalog.filter_sorted(&self.filter, self.sort);
            self.mode = if self.filtered_order.is_empty() {
                ViewMode::NoMatches
            } else {
                ViewMode::Filtered
            };
        }

        self.pagination = Pagination {
            cursor: 0,
            in_flight: false,
            generation: self.pagination.generation.wrapping_add(1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::{CorpusSources, StatBlock, StatKind, TraitValue};
    use std::collections::{BTreeMap, HashMap};

    #[derive(Default)]
    struct Fixture(CorpusSources);

    fn fixture() -> Fixture {
        Fixture::default()
    }

    impl Fixture {
        fn item(mut self, id: &str, traits: &[(&str, &str)]) -> Self {
            self.0
                .images
                .insert(id.to_string(), format!("https://img/{id}.png"));
            let traits: BTreeMap<String, TraitValue> = traits
                .iter()
                .map(|(category, value)| (category.to_string(), TraitValue::from(*value)))
                .collect();
            self.0.traits.insert(id.to_string(), traits);
            self
        }

        fn without_image(mut self, id: &str) -> Self {
            self.0.images.remove(id);
            self
        }

        fn sources(self) -> CorpusSources {
            self.0
        }

        fn catalog(self) -> Arc<Catalog> {
            Arc::new(Catalog::from_sources(self.0))
        }
    }

    fn red_red_blue() -> Arc<Catalog> {
        fixture()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "red")])
            .item("3", &[("body", "blue")])
            .catalog()
    }

    fn numbered(count: u32) -> Arc<Catalog> {
        (1..=count)
            .fold(fixture(), |fixture, n| {
                fixture.item(&n.to_string(), &[("body", "red")])
            })
            .catalog()
    }

    fn ready_view(catalog: Arc<Catalog>, page_size: usize) -> GalleryView {
        let mut view = GalleryView::new(&ViewConfig::with_page_size(page_size));
        view.install(catalog);
        view
    }

    fn raw(ids: &[ItemId]) -> Vec<&str> {
        ids.iter().map(ItemId::as_str).collect()
    }

    #[test]
    fn starts_unready() {
        let mut view = GalleryView::new(&ViewConfig::default());
        assert!(!view.is_ready());
        assert_eq!(view.set_sort(SortOrder::Oldest), Err(ViewError::NotReady));
        assert_eq!(view.request_page(), None);
        assert!(view.lookup("1").is_err());
    }

    #[test]
    fn unfiltered_view_lists_everything_latest_first() {
        let view = ready_view(red_red_blue(), 30);
        assert_eq!(view.mode(), ViewMode::Unfiltered);
        assert_eq!(raw(view.active_order()), ["3", "2", "1"]);
    }

    #[test]
    fn filter_red_sorted_latest() {
        let mut view = ready_view(red_red_blue(), 30);
        let scope = view.toggle_filter("body", "red").unwrap();

        assert!(scope.contains(RenderScope::RESULTS | RenderScope::CONTROLS));
        assert!(view.is_filtering());
        assert_eq!(raw(view.active_order()), ["2", "1"]);
    }

    #[test]
    fn sort_change_reevaluates_filter() {
        let mut view = ready_view(red_red_blue(), 30);
        view.toggle_filter("body", "red").unwrap();
        view.set_sort(SortOrder::Oldest).unwrap();
        assert_eq!(raw(view.active_order()), ["1", "2"]);
        assert_eq!(raw(view.full_order()), ["1", "2", "3"]);
    }

    #[test]
    fn unknown_trait_is_rejected_without_change() {
        let mut view = ready_view(red_red_blue(), 30);
        let generation = view.generation();
        let err = view.toggle_filter("body", "gold").unwrap_err();

        assert!(matches!(err, ViewError::UnknownTrait { .. }));
        assert!(view.filter().is_empty());
        assert_eq!(view.generation(), generation);
    }

    #[test]
    fn contradictory_filters_yield_no_matches() {
        let catalog = fixture()
            .item("1", &[("body", "red"), ("hand", "claw")])
            .item("2", &[("body", "blue"), ("hand", "paw")])
            .catalog();
        let mut view = ready_view(catalog, 30);
        view.toggle_filter("body", "red").unwrap();
        view.toggle_filter("hand", "paw").unwrap();

        assert_eq!(view.mode(), ViewMode::NoMatches);
        assert!(!view.is_filtering());
        assert!(view.active_order().is_empty());
        assert_eq!(view.request_page(), None);
    }

    #[test]
    fn clearing_filters_restores_full_order() {
        let mut view = ready_view(red_red_blue(), 30);
        view.toggle_filter("body", "red").unwrap();
        view.toggle_filter("body", "blue").unwrap();
        assert!(!view.clear_filters().is_empty());

        assert_eq!(view.mode(), ViewMode::Unfiltered);
        let mut ids: Vec<ItemId> = view.active_order().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(view.clear_filters().is_empty());
    }

    #[test]
    fn removing_last_chip_returns_to_unfiltered() {
        let mut view = ready_view(red_red_blue(), 30);
        view.toggle_filter("body", "blue").unwrap();
        assert_eq!(raw(view.active_order()), ["3"]);

        view.remove_filter("body", "blue");
        assert_eq!(view.mode(), ViewMode::Unfiltered);
        assert!(view.remove_filter("body", "blue").is_empty());
    }

    #[test]
    fn pagination_is_single_flight() {
        let mut view = ready_view(numbered(7), 3);

        let first = view.request_page().unwrap();
        assert_eq!(raw(&first.ids), ["7", "6", "5"]);
        // A second trigger before the first page rendered collapses.
        assert_eq!(view.request_page(), None);

        assert!(view.finish_page(first.generation));
        let second = view.request_page().unwrap();
        assert_eq!(second.start, 3);
        assert!(view.finish_page(second.generation));

        let last = view.request_page().unwrap();
        assert_eq!(raw(&last.ids), ["1"]);
        assert!(last.is_last());
        assert!(view.finish_page(last.generation));

        assert_eq!(view.request_page(), None);
        assert_eq!(view.visible().len(), 7);
        assert_eq!(view.remaining(), 0);
    }

    #[test]
    fn reset_invalidates_pages_in_flight() {
        let mut view = ready_view(numbered(5), 2);
        let stale = view.request_page().unwrap();

        view.set_sort(SortOrder::Oldest).unwrap();
        assert_eq!(view.cursor(), 0);
        assert!(!view.finish_page(stale.generation));

        let fresh = view.request_page().unwrap();
        assert_eq!(raw(&fresh.ids), ["1", "2"]);
    }

    #[test]
    fn items_without_images_are_hidden_but_ranked() {
        let catalog = fixture()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "red")])
            .item("3", &[("body", "blue")])
            .item("4", &[("body", "blue")])
            .without_image("4")
            .catalog();
        let mut view = ready_view(catalog.clone(), 30);

        assert_eq!(raw(view.active_order()), ["3", "2", "1"]);
        assert_eq!(catalog.record(&ItemId::from("4")).map(|r| r.rank), Some(4));
        assert_eq!(
            view.add_to_comparison("4"),
            Err(ViewError::Selection(SelectionError::NotFound(ItemId::from("4"))))
        );

        view.toggle_filter("body", "blue").unwrap();
        assert_eq!(raw(view.active_order()), ["3"]);
        let page = view.request_page().unwrap();
        assert_eq!(raw(&page.ids), ["3"]);
    }

    #[test]
    fn comparison_validates_and_orders_by_id() {
        let mut view = ready_view(numbered(12), 30);

        assert_eq!(view.add_to_comparison(" 10 ").unwrap(), ItemId::from("10"));
        view.add_to_comparison("2").unwrap();
        assert_eq!(
            view.add_to_comparison("10"),
            Err(ViewError::Selection(SelectionError::AlreadySelected(
                ItemId::from("10")
            )))
        );
        assert_eq!(
            view.add_to_comparison("404"),
            Err(ViewError::Selection(SelectionError::NotFound(ItemId::from(
                "404"
            ))))
        );
        assert_eq!(
            view.add_to_comparison("  "),
            Err(ViewError::Selection(SelectionError::EmptyId))
        );

        let ids: Vec<&str> = view.comparison().iter().map(ItemId::as_str).collect();
        assert_eq!(ids, ["2", "10"]);

        assert!(view.remove_from_comparison(&ItemId::from("2")));
        assert!(view.clear_comparison());
        assert!(!view.clear_comparison());
    }

    #[test]
    fn stat_sort_requires_stats() {
        let mut view = ready_view(red_red_blue(), 30);
        assert_eq!(
            view.set_sort(SortOrder::Stat(StatKind::Power)),
            Err(ViewError::SortUnavailable(SortOrder::Stat(StatKind::Power)))
        );

        let mut with_stats = fixture()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "red")])
            .sources();
        with_stats.stats = Some(HashMap::from([(
            "1".to_string(),
            StatBlock::new(1, 99, 0, 0),
        )]));
        let mut view = ready_view(Arc::new(Catalog::from_sources(with_stats)), 30);
        view.set_sort(SortOrder::Stat(StatKind::Power)).unwrap();
        assert_eq!(raw(view.active_order()), ["1", "2"]);
    }

    #[test]
    fn install_revalidates_retained_state() {
        let mut view = ready_view(red_red_blue(), 30);
        view.toggle_filter("body", "blue").unwrap();
        view.add_to_comparison("3").unwrap();
        view.add_to_comparison("1").unwrap();

        let shrunk = fixture()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "green")])
            .catalog();
        let revalidation = view.install(shrunk);

        assert_eq!(
            revalidation.dropped_filters,
            [("body".to_string(), "blue".to_string())]
        );
        assert_eq!(revalidation.dropped_selection, [ItemId::from("3")]);
        assert_eq!(view.mode(), ViewMode::Unfiltered);
        assert_eq!(raw(view.active_order()), ["2", "1"]);
        assert_eq!(view.comparison().len(), 1);
    }

    #[test]
    fn location_round_trips_through_apply_query() {
        let mut view = ready_view(red_red_blue(), 30);
        view.toggle_filter("body", "red").unwrap();
        view.set_sort(SortOrder::Rarity).unwrap();
        view.add_to_comparison("3").unwrap();

        let location = view.location("/");
        assert_eq!(location, "/?body=red&sort=rarity&select=3");

        let mut restored = ready_view(red_red_blue(), 30);
        let revalidation =
            restored.apply_query(ViewQuery::parse(&location, restored.default_sort()));
        assert!(revalidation.is_empty());
        assert_eq!(restored.query(), view.query());
        assert_eq!(restored.active_order(), view.active_order());
    }

    #[test]
    fn apply_query_drops_unknown_state() {
        let mut view = ready_view(red_red_blue(), 30);
        let revalidation = view.apply_query(ViewQuery::parse(
            "?body=red|gold&eyes=x&select=1,99&sort=harmony",
            SortOrder::Latest,
        ));

        assert_eq!(revalidation.dropped_filters.len(), 2);
        assert_eq!(revalidation.dropped_selection, [ItemId::from("99")]);
        assert_eq!(
            revalidation.sort_reset,
            Some(SortOrder::Stat(StatKind::Harmony))
        );
        assert_eq!(view.sort_order(), SortOrder::Latest);
        assert_eq!(raw(view.active_order()), ["2", "1"]);
    }

    #[test]
    fn query_before_install_is_validated_on_install() {
        let mut view = GalleryView::new(&ViewConfig::default());
        view.apply_query(ViewQuery::parse("?body=blue&select=3,8", SortOrder::Latest));

        let revalidation = view.install(red_red_blue());
        assert_eq!(revalidation.dropped_selection, [ItemId::from("8")]);
        assert_eq!(raw(view.active_order()), ["3"]);
    }
}
