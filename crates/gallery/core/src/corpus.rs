//! Corpus store: the immutable-per-load set of collection items.
//!
//! A corpus is assembled from the raw data sources in one step and never
//! patched afterwards. The traits source is authoritative for existence:
//! every trait-bearing ID counts towards trait statistics and rarity. Only
//! items that also have an image are displayable; the rest are listed in
//! [`Corpus::skipped`] and never reach pagination, rendering or lookups.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::item::{Item, ItemId, StatBlock, TraitValue};

/// Raw data sources as read from the collection files.
///
/// `images` and `traits` are mandatory; `stats` and `new_ids` are `None`
/// when their file was missing or unreadable.
#[derive(Clone, Debug, Default)]
pub struct CorpusSources {
    pub images: HashMap<String, String>,
    pub traits: HashMap<String, BTreeMap<String, TraitValue>>,
    pub stats: Option<HashMap<String, StatBlock>>,
    pub new_ids: Option<Vec<u64>>,
}

/// Items indexed by ID, stored in ascending ID order.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    /// Displayable items.
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    /// Every trait-bearing ID, displayable or not.
    ids: Vec<ItemId>,
    /// Traits of the IDs without an image.
    trait_only: HashMap<ItemId, BTreeMap<String, TraitValue>>,
    skipped: Vec<ItemId>,
    has_stats: bool,
    has_new_ids: bool,
}

impl Corpus {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the corpus from raw sources, replacing nothing in place.
    pub fn from_sources(sources: CorpusSources) -> Self {
        let CorpusSources {
            mut images,
            traits,
            stats,
            new_ids,
        } = sources;

        let has_stats = stats.is_some();
        let has_new_ids = new_ids.is_some();
        let stats = stats.unwrap_or_default();
        let new_ids: HashSet<u64> = new_ids.unwrap_or_default().into_iter().collect();

        let mut items = Vec::with_capacity(traits.len());
        let mut ids = Vec::with_capacity(traits.len());
        let mut trait_only = HashMap::new();
        let mut skipped = Vec::new();

        for (raw_id, item_traits) in traits {
            let id = ItemId::new(raw_id);
            ids.push(id.clone());
            let Some(image) = images.remove(id.as_str()) else {
                skipped.push(id.clone());
                trait_only.insert(id, item_traits);
                continue;
            };

            let is_new = id.numeric().is_some_and(|n| new_ids.contains(&n));
            let item_stats = stats.get(id.as_str()).copied();

            items.push(Item {
                id,
                image,
                traits: item_traits,
                stats: item_stats,
                is_new,
            });
        }

        items.sort_by(|a, b| a.id.cmp(&b.id));
        ids.sort();
        skipped.sort();

        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id.clone(), position))
            .collect();

        Self {
            items,
            index,
            ids,
            trait_only,
            skipped,
            has_stats,
            has_new_ids,
        }
    }

    /// Displayable item with this ID.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Whether `id` is a displayable item.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Every trait-bearing ID in ascending order, including those without
    /// an image.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Displayable item IDs in ascending order.
    pub fn displayable_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Displayable items in ascending ID order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Traits of a trait-bearing ID, displayable or not.
    pub fn traits(&self, id: &ItemId) -> Option<&BTreeMap<String, TraitValue>> {
        self.get(id)
            .map(|item| &item.traits)
            .or_else(|| self.trait_only.get(id))
    }

    /// Every trait-bearing ID with its traits, in ascending ID order.
    pub fn trait_sets(&self) -> impl Iterator<Item = (&ItemId, &BTreeMap<String, TraitValue>)> {
        self.ids
            .iter()
            .filter_map(|id| self.traits(id).map(|traits| (id, traits)))
    }

    /// Number of trait-bearing IDs; the population for trait statistics.
    pub fn total(&self) -> usize {
        self.ids.len()
    }

    /// Number of displayable items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Trait-bearing IDs that cannot be displayed because they have no image.
    pub fn skipped(&self) -> &[ItemId] {
        &self.skipped
    }

    /// Whether the optional stats source was available.
    pub fn has_stats(&self) -> bool {
        self.has_stats
    }

    /// Whether the optional new-ID metadata was available.
    pub fn has_new_ids(&self) -> bool {
        self.has_new_ids
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds sources where every listed item has an image.
    #[derive(Default)]
    pub struct SourcesBuilder(CorpusSources);

    pub fn sources() -> SourcesBuilder {
        SourcesBuilder::default()
    }

    impl SourcesBuilder {
        pub fn item(mut self, id: &str, traits: &[(&str, &str)]) -> Self {
            self.0
                .images
                .insert(id.to_string(), format!("https://img/{id}.png"));
            self.0.traits.insert(
                id.to_string(),
                traits
                    .iter()
                    .map(|(category, value)| (category.to_string(), TraitValue::from(*value)))
                    .collect(),
            );
            self
        }

        pub fn build(self) -> CorpusSources {
            self.0
        }

        pub fn corpus(self) -> Corpus {
            Corpus::from_sources(self.0)
        }
    }

    /// The three-item example: 1 and 2 are red, 3 is blue.
    pub fn red_red_blue() -> Corpus {
        sources()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "red")])
            .item("3", &[("body", "blue")])
            .corpus()
    }
}
