//! Sort orders over arbitrary subsets of item IDs.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::corpus::Corpus;
use crate::error::ParseSortError;
use crate::item::{ItemId, StatKind};
use crate::rarity::RarityTable;

/// How the active collection is ordered.
///
/// Names round-trip through [`FromStr`]/[`fmt::Display`]: `latest`,
/// `oldest`, `rarity`, and one name per [`StatKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum SortOrder {
    /// Highest ID first.
    #[default]
    Latest,
    /// Lowest ID first.
    Oldest,
    /// Rarity rank ascending; unranked items last.
    Rarity,
    /// Stat value descending; items without stats count as 0.
    Stat(StatKind),
}

impl SortOrder {
    pub const COUNT: usize = 3 + StatKind::COUNT;

    pub const fn all() -> [SortOrder; Self::COUNT] {
        [
            Self::Latest,
            Self::Oldest,
            Self::Rarity,
            Self::Stat(StatKind::Health),
            Self::Stat(StatKind::Power),
            Self::Stat(StatKind::Violence),
            Self::Stat(StatKind::Harmony),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Rarity => "rarity",
            Self::Stat(StatKind::Health) => "health",
            Self::Stat(StatKind::Power) => "power",
            Self::Stat(StatKind::Violence) => "violence",
            Self::Stat(StatKind::Harmony) => "harmony",
        }
    }

    pub fn stat(&self) -> Option<StatKind> {
        match self {
            Self::Stat(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether this order needs the optional stats source.
    pub fn requires_stats(&self) -> bool {
        self.stat().is_some()
    }

    /// Parses a sort name, falling back to the default for unknown names.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            "rarity" => Ok(Self::Rarity),
            _ => trimmed
                .parse::<StatKind>()
                .map(Self::Stat)
                .map_err(|_| ParseSortError(raw.to_owned())),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ParseSortError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.name().to_owned()
    }
}

/// Orders `ids` in place. The sort is stable: IDs with equal keys keep their
/// relative input order. Missing corpus or rarity data never panics.
pub fn sort_ids(ids: &mut [ItemId], order: SortOrder, corpus: &Corpus, rarity: &RarityTable) {
    match order {
        SortOrder::Latest => ids.sort_by(|a, b| b.cmp(a)),
        SortOrder::Oldest => ids.sort_by(|a, b| a.cmp(b)),
        SortOrder::Rarity => ids.sort_by(|a, b| by_rank(rarity.rank(a), rarity.rank(b))),
        SortOrder::Stat(kind) => ids.sort_by_key(|id| {
            let value = corpus
                .get(id)
                .and_then(|item| item.stat(kind))
                .unwrap_or(0);
            std::cmp::Reverse(value)
        }),
    }
}

/// Ascending rank with unranked entries treated as +infinity.
fn by_rank(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixtures::{red_red_blue, sources};
    use crate::item::StatBlock;
    use crate::occurrence::TraitOccurrences;

    use std::collections::HashMap;

    fn ids(raw: &[&str]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::from).collect()
    }

    fn raw(ids: &[ItemId]) -> Vec<&str> {
        ids.iter().map(ItemId::as_str).collect()
    }

    fn rarity_for(corpus: &Corpus) -> RarityTable {
        RarityTable::compute(corpus, &TraitOccurrences::compute(corpus))
    }

    #[test]
    fn names_round_trip() {
        for order in SortOrder::all() {
            assert_eq!(order.name().parse::<SortOrder>().unwrap(), order);
            assert_eq!(order.to_string(), order.name());
        }
        assert_eq!("Rarity".parse::<SortOrder>().unwrap(), SortOrder::Rarity);
        assert!("newest".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::parse_or_default("newest"), SortOrder::Latest);
    }

    #[test]
    fn latest_and_oldest_compare_numerically() {
        let corpus = red_red_blue();
        let rarity = rarity_for(&corpus);
        let mut list = ids(&["2", "10", "1"]);

        sort_ids(&mut list, SortOrder::Latest, &corpus, &rarity);
        assert_eq!(raw(&list), ["10", "2", "1"]);

        sort_ids(&mut list, SortOrder::Oldest, &corpus, &rarity);
        assert_eq!(raw(&list), ["1", "2", "10"]);
    }

    #[test]
    fn rarity_sorts_by_rank_with_unranked_last() {
        let corpus = red_red_blue();
        let rarity = rarity_for(&corpus);
        let mut list = ids(&["404", "2", "1", "3"]);

        sort_ids(&mut list, SortOrder::Rarity, &corpus, &rarity);
        assert_eq!(raw(&list), ["3", "1", "2", "404"]);
    }

    #[test]
    fn stat_sort_is_descending_and_missing_stats_count_as_zero() {
        let mut sources = sources()
            .item("1", &[("body", "red")])
            .item("2", &[("body", "red")])
            .item("3", &[("body", "blue")])
            .item("4", &[("body", "blue")])
            .build();
        sources.stats = Some(HashMap::from([
            ("1".to_string(), StatBlock::new(10, 5, -2, 1)),
            ("2".to_string(), StatBlock::new(30, 5, 4, 1)),
            ("3".to_string(), StatBlock::new(20, 5, 0, 1)),
        ]));
        let corpus = Corpus::from_sources(sources);
        let rarity = rarity_for(&corpus);

        let mut list = ids(&["1", "2", "3", "4"]);
        sort_ids(&mut list, SortOrder::Stat(StatKind::Health), &corpus, &rarity);
        assert_eq!(raw(&list), ["2", "3", "1", "4"]);

        let mut list = ids(&["1", "2", "3", "4"]);
        sort_ids(&mut list, SortOrder::Stat(StatKind::Violence), &corpus, &rarity);
        assert_eq!(raw(&list), ["2", "3", "4", "1"]);

        // All equal: input order preserved.
        let mut list = ids(&["3", "1", "2"]);
        sort_ids(&mut list, SortOrder::Stat(StatKind::Power), &corpus, &rarity);
        assert_eq!(raw(&list), ["3", "1", "2"]);
    }

    #[test]
    fn sorting_twice_is_identical() {
        let corpus = red_red_blue();
        let rarity = rarity_for(&corpus);
        for order in SortOrder::all() {
            let mut once = ids(&["1", "2", "3"]);
            sort_ids(&mut once, order, &corpus, &rarity);
            let mut twice = once.clone();
            sort_ids(&mut twice, order, &corpus, &rarity);
            assert_eq!(once, twice, "order {order}");
        }
    }
}
