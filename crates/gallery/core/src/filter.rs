//! Trait filter: AND across categories, OR within a category.

use std::collections::{BTreeMap, BTreeSet};

use crate::corpus::Corpus;
use crate::item::{Item, ItemId};

/// Selected trait constraints, category → accepted value names.
///
/// Categories never map to an empty set; removing the last value of a
/// category removes the category. An empty filter means "no filtering".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraitFilter {
    selected: BTreeMap<String, BTreeSet<String>>,
}

impl TraitFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of (category, value) constraints.
    pub fn len(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Adds a constraint. Returns false if it was already present.
    pub fn insert(&mut self, category: impl Into<String>, value: impl Into<String>) -> bool {
        self.selected
            .entry(category.into())
            .or_default()
            .insert(value.into())
    }

    /// Removes a constraint. Returns false if it was not present.
    pub fn remove(&mut self, category: &str, value: &str) -> bool {
        let Some(values) = self.selected.get_mut(category) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.selected.remove(category);
        }
        removed
    }

    /// Flips a constraint. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, category: &str, value: &str) -> bool {
        if self.remove(category, value) {
            false
        } else {
            self.insert(category, value);
            true
        }
    }

    pub fn contains(&self, category: &str, value: &str) -> bool {
        self.selected
            .get(category)
            .is_some_and(|values| values.contains(value))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Constrained categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    pub fn values(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.selected.get(category)
    }

    /// Every (category, value) constraint, ordered by category then value.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selected.iter().flat_map(|(category, values)| {
            values
                .iter()
                .map(move |value| (category.as_str(), value.as_str()))
        })
    }

    /// Keeps only the constraints accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.selected.retain(|category, values| {
            values.retain(|value| keep(category, value));
            !values.is_empty()
        });
    }

    /// An item matches when, for every constrained category, it declares the
    /// category and its value is one of the accepted values.
    pub fn matches(&self, item: &Item) -> bool {
        self.selected.iter().all(|(category, accepted)| {
            item.trait_name(category)
                .is_some_and(|name| accepted.contains(name))
        })
    }

    /// Matching displayable IDs in corpus order. Ordering is left to the sort
    /// engine.
    pub fn apply(&self, corpus: &Corpus) -> Vec<ItemId> {
        corpus
            .items()
            .filter(|item| self.matches(item))
            .map(|item| item.id.clone())
            .collect()
    }
}

impl<C, V> FromIterator<(C, V)> for TraitFilter
where
    C: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut filter = Self::new();
        for (category, value) in iter {
            filter.insert(category, value);
        }
        filter
    }
}
