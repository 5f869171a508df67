use gallery_core::SortOrder;
use gallery_runtime::{ViewMode, ViewSnapshot};

use super::card::capitalize;

pub const UNFILTERED_TITLE: &str = "Showing all Kamigotchi";
pub const FILTERED_TITLE: &str = "Found matching Kamigotchi";
pub const NO_MATCHES_TEXT: &str = "No Kamigotchi match your selected traits";

/// One removable active constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterChip {
    pub category: String,
    pub value: String,
    /// `Category: value`.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsHeader {
    pub title: &'static str,
    /// Length of the active collection.
    pub count: usize,
    pub sort: SortOrder,
    /// Empty when unfiltered.
    pub chips: Vec<FilterChip>,
    /// Set in the no-match state.
    pub empty_text: Option<&'static str>,
}

impl ResultsHeader {
    pub fn from_snapshot(snapshot: &ViewSnapshot) -> Self {
        let title = match snapshot.mode {
            ViewMode::Unfiltered => UNFILTERED_TITLE,
            ViewMode::Filtered | ViewMode::NoMatches => FILTERED_TITLE,
        };
        let chips = snapshot
            .filter
            .constraints()
            .map(|(category, value)| FilterChip {
                category: category.to_owned(),
                value: value.to_owned(),
                label: format!("{}: {value}", capitalize(category)),
            })
            .collect();

        Self {
            title,
            count: snapshot.total,
            sort: snapshot.sort,
            chips,
            empty_text: (snapshot.mode == ViewMode::NoMatches).then_some(NO_MATCHES_TEXT),
        }
    }
}
