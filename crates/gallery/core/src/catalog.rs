//! A corpus bundled with its derived statistics.

use std::sync::Arc;

use crate::corpus::{Corpus, CorpusSources};
use crate::filter::TraitFilter;
use crate::item::{Item, ItemId};
use crate::occurrence::TraitOccurrences;
use crate::rarity::{RarityRecord, RarityTable, RarityTier};
use crate::sort::{SortOrder, sort_ids};

/// Corpus, occurrence counts and rarity table computed from the same load.
///
/// Built in one step and shared behind an [`Arc`]; a refresh builds a new
/// catalog and swaps the pointer, so readers never see a corpus paired with
/// statistics from another load.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    corpus: Corpus,
    occurrences: TraitOccurrences,
    rarity: RarityTable,
}

impl Catalog {
    pub fn build(corpus: Corpus) -> Self {
        let occurrences = TraitOccurrences::compute(&corpus);
        let rarity = RarityTable::compute(&corpus, &occurrences);
        Self {
            corpus,
            occurrences,
            rarity,
        }
    }

    pub fn from_sources(sources: CorpusSources) -> Self {
        Self::build(Corpus::from_sources(sources))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn occurrences(&self) -> &TraitOccurrences {
        &self.occurrences
    }

    pub fn rarity(&self) -> &RarityTable {
        &self.rarity
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.corpus.get(id)
    }

    pub fn record(&self, id: &ItemId) -> Option<RarityRecord> {
        self.rarity.get(id)
    }

    pub fn tier(&self, id: &ItemId) -> Option<RarityTier> {
        self.rarity.tier(id)
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Whether `order` can be honoured with the loaded sources.
    pub fn supports(&self, order: SortOrder) -> bool {
        !order.requires_stats() || self.corpus.has_stats()
    }

    /// Orders `ids` in place against this catalog.
    pub fn sort(&self, ids: &mut [ItemId], order: SortOrder) {
        sort_ids(ids, order, &self.corpus, &self.rarity);
    }

    /// Every displayable item ID in `order`.
    pub fn sorted_ids(&self, order: SortOrder) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.corpus.displayable_ids().cloned().collect();
        self.sort(&mut ids, order);
        ids
    }

    /// Displayable IDs matching `filter`, in `order`.
    pub fn filter_sorted(&self, filter: &TraitFilter, order: SortOrder) -> Vec<ItemId> {
        let mut ids = filter.apply(&self.corpus);
        self.sort(&mut ids, order);
        ids
    }
}
