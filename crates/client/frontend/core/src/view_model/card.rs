use gallery_core::{Catalog, Item, ItemId, RarityTier, SortOrder, StatBlock, StatKind};

/// Categories whose affinity is worth showing next to the value.
const AFFINITY_CATEGORIES: [&str; 2] = ["body", "hand"];

pub fn shows_affinity(category: &str) -> bool {
    AFFINITY_CATEGORIES.contains(&category)
}

/// Upper-cases the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One trait row on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitLine {
    pub category: String,
    /// Capitalised category name.
    pub label: String,
    pub value: String,
    pub affinity: Option<String>,
    /// Stat modifiers from a structured descriptor, in name order.
    pub modifiers: Vec<(String, i32)>,
}

/// Everything shown for one item.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub id: ItemId,
    pub image: String,
    /// In category-name order.
    pub traits: Vec<TraitLine>,
    pub rank: Option<u32>,
    pub score: Option<f64>,
    pub tier: Option<RarityTier>,
    pub stats: Option<StatBlock>,
    /// Stat named by the active stat sort.
    pub highlighted: Option<(StatKind, i32)>,
    pub is_new: bool,
    /// True only inside the comparison tray.
    pub removable: bool,
}

impl CardView {
    pub fn build(catalog: &Catalog, item: &Item, sort: SortOrder, removable: bool) -> Self {
        let traits = item
            .traits
            .iter()
            .map(|(category, value)| TraitLine {
                category: category.clone(),
                label: capitalize(category),
                value: value.name().to_owned(),
                affinity: value
                    .affinity()
                    .filter(|_| shows_affinity(category))
                    .map(str::to_owned),
                modifiers: value
                    .modifiers()
                    .map(|(name, amount)| (name.to_owned(), amount))
                    .collect(),
            })
            .collect();

        let record = catalog.record(&item.id);
        let highlighted = sort
            .stat()
            .and_then(|kind| item.stat(kind).map(|value| (kind, value)));

        Self {
            id: item.id.clone(),
            image: item.image.clone(),
            traits,
            rank: record.map(|record| record.rank),
            score: record.map(|record| record.score),
            tier: catalog.tier(&item.id),
            stats: item.stats,
            highlighted,
            is_new: item.is_new,
            removable,
        }
    }

    /// Score to four decimals, `?` when unscored.
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => format!("{score:.4}"),
            None => "?".to_owned(),
        }
    }

    pub fn rank_label(&self) -> String {
        match self.rank {
            Some(rank) => format!("#{rank}"),
            None => "?".to_owned(),
        }
    }
}
