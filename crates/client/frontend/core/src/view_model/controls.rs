use std::collections::HashMap;

use gallery_core::{Catalog, TraitFilter, TraitValue};

use super::card::{capitalize, shows_affinity};

pub const NO_MATCHING_TRAITS: &str = "No matching traits";

/// One checkbox in a filter group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub count: u32,
    /// Share of all items, one decimal.
    pub percent: String,
    pub selected: bool,
    pub affinity: Option<String>,
    pub modifiers: Vec<(String, i32)>,
}

/// Controls for one category, rarest value first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterGroupView {
    pub category: String,
    pub label: String,
    pub options: Vec<FilterOption>,
    search: String,
}

impl FilterGroupView {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Options whose name contains the search text, ignoring case.
    pub fn visible_options(&self) -> Vec<&FilterOption> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.options.iter().collect();
        }
        self.options
            .iter()
            .filter(|option| option.value.to_lowercase().contains(&needle))
            .collect()
    }

    /// Placeholder shown when the search hides every option.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible_options()
            .is_empty()
            .then_some(NO_MATCHING_TRAITS)
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|option| option.selected).count()
    }
}

/// All filter groups, in category-name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterControls {
    pub groups: Vec<FilterGroupView>,
}

impl FilterControls {
    pub fn build(catalog: &Catalog, filter: &TraitFilter) -> Self {
        let descriptors = first_descriptors(catalog);
        let occurrences = catalog.occurrences();

        let groups = occurrences
            .categories()
            .map(|category| {
                let options = occurrences
                    .values_by_rarity(category)
                    .into_iter()
                    .map(|(value, count)| {
                        let descriptor = descriptors.get(&(category, value));
                        FilterOption {
                            value: value.to_owned(),
                            count,
                            percent: format!("{:.1}", occurrences.percentage(category, value)),
                            selected: filter.contains(category, value),
                            affinity: descriptor
                                .and_then(|descriptor| descriptor.affinity())
                                .filter(|_| shows_affinity(category))
                                .map(str::to_owned),
                            modifiers: descriptor
                                .map(|descriptor| {
                                    descriptor
                                        .modifiers()
                                        .map(|(name, amount)| (name.to_owned(), amount))
                                        .collect()
                                })
                                .unwrap_or_default(),
                        }
                    })
                    .collect();

                FilterGroupView {
                    category: category.to_owned(),
                    label: capitalize(category),
                    options,
                    search: String::new(),
                }
            })
            .collect();

        Self { groups }
    }

    pub fn group(&self, category: &str) -> Option<&FilterGroupView> {
        self.groups.iter().find(|group| group.category == category)
    }

    pub fn group_mut(&mut self, category: &str) -> Option<&mut FilterGroupView> {
        self.groups
            .iter_mut()
            .find(|group| group.category == category)
    }
}

/// First structured descriptor seen for each (category, value), in ID order.
fn first_descriptors(catalog: &Catalog) -> HashMap<(&str, &str), &TraitValue> {
    let mut descriptors = HashMap::new();
    for (_, traits) in catalog.corpus().trait_sets() {
        for (category, value) in traits {
            if value.is_detailed() {
                descriptors
                    .entry((category.as_str(), value.name()))
                    .or_insert(value);
            }
        }
    }
    descriptors
}
