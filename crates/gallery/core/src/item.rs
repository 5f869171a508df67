//! Item identity, trait values and stat blocks.
//!
//! Item IDs keep the exact external spelling from the data files but order
//! numerically, so "recency" sorts and the comparison tray agree with the
//! token numbering of the collection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Collection token identifier.
///
/// Ordering is numeric when both IDs parse as unsigned integers. Numeric IDs
/// order before non-numeric ones, and remaining ties fall back to the raw
/// string so the order is total and consistent with `Eq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the ID, if it is a plain unsigned integer.
    pub fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Value an item takes in one trait category.
///
/// The data files use either a bare name or a structured record carrying an
/// affinity tag and stat modifiers. Both resolve to the same logical value
/// through [`TraitValue::name`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TraitValue {
    Name(String),
    Detailed(TraitDetail),
}

/// Structured trait descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitDetail {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub affinity: Option<String>,
    /// Stat name → signed modifier contributed by this trait value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BTreeMap<String, i32>,
}

impl TraitValue {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed(detail) => &detail.name,
        }
    }

    pub fn affinity(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Detailed(detail) => detail.affinity.as_deref(),
        }
    }

    /// Stat modifiers; empty for bare names.
    pub fn modifiers(&self) -> impl Iterator<Item = (&str, i32)> {
        let stats = match self {
            Self::Name(_) => None,
            Self::Detailed(detail) => Some(&detail.stats),
        };
        stats
            .into_iter()
            .flat_map(|map| map.iter().map(|(name, value)| (name.as_str(), *value)))
    }

    pub fn is_detailed(&self) -> bool {
        matches!(self, Self::Detailed(_))
    }
}

impl From<&str> for TraitValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// Named stats carried by the optional stats file.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Health,
    Power,
    Violence,
    Harmony,
}

impl StatKind {
    pub const COUNT: usize = 4;

    /// Display order used by stat blocks.
    pub const fn all() -> [StatKind; Self::COUNT] {
        [Self::Health, Self::Power, Self::Violence, Self::Harmony]
    }
}

/// Per-item stat values. Missing fields read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub health: i32,
    pub power: i32,
    pub violence: i32,
    pub harmony: i32,
}

impl StatBlock {
    pub const fn new(health: i32, power: i32, violence: i32, harmony: i32) -> Self {
        Self {
            health,
            power,
            violence,
            harmony,
        }
    }

    #[inline]
    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Power => self.power,
            StatKind::Violence => self.violence,
            StatKind::Harmony => self.harmony,
        }
    }
}

/// One displayable collection member.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub image: String,
    /// Category → value, iterated in category-name order.
    pub traits: BTreeMap<String, TraitValue>,
    pub stats: Option<StatBlock>,
    pub is_new: bool,
}

impl Item {
    /// Value name this item declares for `category`.
    pub fn trait_name(&self, category: &str) -> Option<&str> {
        self.traits.get(category).map(TraitValue::name)
    }

    pub fn stat(&self, kind: StatKind) -> Option<i32> {
        self.stats.map(|block| block.get(kind))
    }

    pub fn category_count(&self) -> usize {
        self.traits.len()
    }
}
