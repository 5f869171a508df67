//! URL query form of the view state.
//!
//! ```text
//! /gallery?body=red|blue&hand=claw&sort=rarity&select=4,12
//! ```
//!
//! - one parameter per filtered category, values joined with `|`
//! - `sort` only when the order differs from the default
//! - `select` with comma-joined comparison IDs, only when non-empty
//!
//! Encoding follows `application/x-www-form-urlencoded` (spaces become `+`).
//! Decoding is lenient: it never fails, and validation against the loaded
//! collection is left to [`GalleryView::apply_query`](super::GalleryView::apply_query).

use std::collections::BTreeSet;

use url::form_urlencoded;

use gallery_core::{ItemId, SortOrder, TraitFilter};

pub const SORT_PARAM: &str = "sort";
pub const SELECT_PARAM: &str = "select";

const VALUE_SEPARATOR: char = '|';
const ID_SEPARATOR: char = ',';

/// The part of the view state that survives in a URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub filter: TraitFilter,
    pub sort: SortOrder,
    pub selection: BTreeSet<ItemId>,
}

impl ViewQuery {
    /// Encodes the query string, without a leading `?`.
    pub fn to_query_string(&self, default_sort: SortOrder) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for category in self.filter.categories() {
            if let Some(values) = self.filter.values(category) {
                let joined = join(values.iter().map(String::as_str), VALUE_SEPARATOR);
                serializer.append_pair(category, &joined);
            }
        }

        if self.sort != default_sort {
            serializer.append_pair(SORT_PARAM, self.sort.name());
        }

        if !self.selection.is_empty() {
            let joined = join(self.selection.iter().map(ItemId::as_str), ID_SEPARATOR);
            serializer.append_pair(SELECT_PARAM, &joined);
        }

        serializer.finish()
    }

    /// `path` with the encoded query appended; bare `path` when empty.
    pub fn to_location(&self, path: &str, default_sort: SortOrder) -> String {
        let query = self.to_query_string(default_sort);
        if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Decodes a location, a `?query` or a bare query string.
    ///
    /// A missing or unrecognized `sort` yields `default_sort`. Empty values
    /// and IDs are skipped. When a parameter repeats, filter values and IDs
    /// accumulate and the first `sort` wins.
    pub fn parse(raw: &str, default_sort: SortOrder) -> Self {
        let mut filter = TraitFilter::new();
        let mut selection = BTreeSet::new();
        let mut sort = None;

        for (key, value) in form_urlencoded::parse(query_part(raw).as_bytes()) {
            match key.as_ref() {
                SORT_PARAM => {
                    if sort.is_none() {
                        sort = Some(value.parse::<SortOrder>().ok());
                    }
                }
                SELECT_PARAM => selection.extend(
                    value
                        .split(ID_SEPARATOR)
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(ItemId::from),
                ),
                category => {
                    for trait_value in value.split(VALUE_SEPARATOR).filter(|v| !v.is_empty()) {
                        filter.insert(category, trait_value);
                    }
                }
            }
        }

        let sort = sort.flatten().unwrap_or(default_sort);

        Self {
            filter,
            sort,
            selection,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.selection.is_empty()
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>, separator: char) -> String {
    let mut joined = String::new();
    for (index, part) in parts.enumerate() {
        if index > 0 {
            joined.push(separator);
        }
        joined.push_str(part);
    }
    joined
}

fn query_part(raw: &str) -> &str {
    let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
    match raw.split_once('?') {
        Some((_, query)) => query,
        None if raw.contains('=') => raw,
        None => "",
    }
}
