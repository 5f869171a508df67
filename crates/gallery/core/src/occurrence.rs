//! Trait statistics: how many items carry each (category, value) pair.

use std::collections::BTreeMap;

use crate::corpus::Corpus;

/// Occurrence counts per category and value name.
///
/// For a fixed category, the counts over all its values sum to the number of
/// items that declare the category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraitOccurrences {
    counts: BTreeMap<String, BTreeMap<String, u32>>,
    total_items: usize,
}

impl TraitOccurrences {
    /// Counts every declared trait in the corpus, including items that have
    /// no image. Bare and structured trait values with the same name count
    /// as the same value.
    pub fn compute(corpus: &Corpus) -> Self {
        let mut counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();

        for (_, traits) in corpus.trait_sets() {
            for (category, value) in traits {
                *counts
                    .entry(category.clone())
                    .or_default()
                    .entry(value.name().to_owned())
                    .or_default() += 1;
            }
        }

        Self {
            counts,
            total_items: corpus.total(),
        }
    }

    /// Number of trait-bearing items the counts were taken from.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn count(&self, category: &str, value: &str) -> u32 {
        self.counts
            .get(category)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, category: &str, value: &str) -> bool {
        self.count(category, value) > 0
    }

    /// Categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Value counts for one category, in value-name order.
    pub fn values(&self, category: &str) -> Option<&BTreeMap<String, u32>> {
        self.counts.get(category)
    }

    /// Number of items declaring `category`.
    pub fn declared(&self, category: &str) -> u32 {
        self.counts
            .get(category)
            .map_or(0, |values| values.values().sum())
    }

    /// Values of a category ordered rarest first; equal counts by name.
    pub fn values_by_rarity(&self, category: &str) -> Vec<(&str, u32)> {
        let mut values: Vec<(&str, u32)> = self
            .counts
            .get(category)
            .map(|values| {
                values
                    .iter()
                    .map(|(name, count)| (name.as_str(), *count))
                    .collect()
            })
            .unwrap_or_default();
        // Stable sort keeps name order for equal counts.
        values.sort_by_key(|(_, count)| *count);
        values
    }

    /// Share of all items carrying the value, in percent.
    pub fn percentage(&self, category: &str, value: &str) -> f64 {
        if self.total_items == 0 {
            return 0.0;
        }
        f64::from(self.count(category, value)) / self.total_items as f64 * 100.0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, u32>)> {
        self.counts
            .iter()
            .map(|(category, values)| (category.as_str(), values))
    }
}
