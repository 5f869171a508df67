//! Information-content rarity scoring.
//!
//! # Algorithm
//!
//! 1. `IC(category, value) = -ln(count / total_items)`; rarer values carry
//!    more information.
//! 2. Each category is normalized by its largest IC so every category
//!    contributes on a 0..1 scale regardless of how many values it has.
//! 3. An item's score is the mean normalized IC over the categories it
//!    declares. An item declaring nothing scores 0.
//! 4. Items are ranked by descending score. Ties keep corpus order
//!    (ascending ID), so identical input always yields identical ranks.
//!
//! A category with a single value across the whole corpus has a maximum IC
//! of 0 and contributes 0 to every item that declares it.

use std::collections::{BTreeMap, HashMap};

use crate::corpus::Corpus;
use crate::item::ItemId;
use crate::occurrence::TraitOccurrences;

/// Score and dense 1-based rank of one item. Rank 1 is the rarest item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RarityRecord {
    pub score: f64,
    pub rank: u32,
}

/// Presentational rarity band derived from rank percentile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RarityTier {
    Legendary,
    Epic,
    Rare,
    Uncommon,
    Common,
}

impl RarityTier {
    /// Tier for `rank` out of `total` ranked items.
    pub fn from_rank(rank: u32, total: usize) -> Self {
        if total == 0 {
            return Self::Common;
        }
        let percentile = f64::from(rank) / total as f64 * 100.0;
        if percentile <= 1.0 {
            Self::Legendary
        } else if percentile <= 5.0 {
            Self::Epic
        } else if percentile <= 15.0 {
            Self::Rare
        } else if percentile <= 40.0 {
            Self::Uncommon
        } else {
            Self::Common
        }
    }
}

/// Rarity records for every item of one corpus.
#[derive(Clone, Debug, Default)]
pub struct RarityTable {
    records: HashMap<ItemId, RarityRecord>,
    ranked: Vec<ItemId>,
}

impl RarityTable {
    pub fn compute(corpus: &Corpus, occurrences: &TraitOccurrences) -> Self {
        let total = occurrences.total_items();
        if total == 0 {
            return Self::default();
        }

        let information = information_content(occurrences, total);
        let max_per_category: HashMap<&str, f64> = information
            .iter()
            .map(|(category, values)| {
                let max = values.values().copied().fold(f64::NEG_INFINITY, f64::max);
                (*category, max)
            })
            .collect();

        let mut scored: Vec<(&ItemId, f64)> = corpus
            .trait_sets()
            .map(|(id, traits)| {
                let declared = traits.len();
                if declared == 0 {
                    return (id, 0.0);
                }

                let sum: f64 = traits
                    .iter()
                    .map(|(category, value)| {
                        let ic = information
                            .get(category.as_str())
                            .and_then(|values| values.get(value.name()))
                            .copied()
                            .unwrap_or(0.0);
                        let max = max_per_category
                            .get(category.as_str())
                            .copied()
                            .unwrap_or(0.0);
                        normalized(ic, max)
                    })
                    .sum();

                (id, sum / declared as f64)
            })
            .collect();

        // Stable: equal scores keep ascending ID order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut records = HashMap::with_capacity(scored.len());
        let mut ranked = Vec::with_capacity(scored.len());
        for (position, (id, score)) in scored.into_iter().enumerate() {
            records.insert(
                id.clone(),
                RarityRecord {
                    score,
                    rank: position as u32 + 1,
                },
            );
            ranked.push(id.clone());
        }

        Self { records, ranked }
    }

    pub fn get(&self, id: &ItemId) -> Option<RarityRecord> {
        self.records.get(id).copied()
    }

    pub fn rank(&self, id: &ItemId) -> Option<u32> {
        self.records.get(id).map(|record| record.rank)
    }

    pub fn tier(&self, id: &ItemId) -> Option<RarityTier> {
        self.rank(id)
            .map(|rank| RarityTier::from_rank(rank, self.ranked.len()))
    }

    /// IDs from rarest to most common.
    pub fn ranked(&self) -> &[ItemId] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

fn information_content(
    occurrences: &TraitOccurrences,
    total: usize,
) -> HashMap<&str, BTreeMap<&str, f64>> {
    occurrences
        .iter()
        .map(|(category, values)| {
            let ic = values
                .iter()
                .map(|(value, count)| {
                    let probability = f64::from(*count) / total as f64;
                    (value.as_str(), -probability.ln())
                })
                .collect();
            (category, ic)
        })
        .collect()
}

/// Guarded normalization: a category without information contributes 0.
#[inline]
fn normalized(ic: f64, max: f64) -> f64 {
    if max > 0.0 { ic / max } else { 0.0 }
}
