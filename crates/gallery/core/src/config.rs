use crate::sort::SortOrder;

/// Gallery configuration: data file names and view tunables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalleryConfig {
    pub files: DataFiles,
    pub view: ViewConfig,
}

/// File names of the four data sources, relative to the data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DataFiles {
    /// ID → image URL. Mandatory.
    pub images: String,
    /// ID → category → value. Mandatory.
    pub traits: String,
    /// `{ ID → { "stats": { stat → value } } }`. Optional.
    pub stats: String,
    /// `{ "newKamiIds": [..] }`. Optional.
    pub metadata: String,
}

impl DataFiles {
    pub const DEFAULT_IMAGES: &'static str = "kamiImage.json";
    pub const DEFAULT_TRAITS: &'static str = "kamiTraits.json";
    pub const DEFAULT_STATS: &'static str = "kamiStats.json";
    pub const DEFAULT_METADATA: &'static str = "kamiMetadata.json";
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            images: Self::DEFAULT_IMAGES.to_owned(),
            traits: Self::DEFAULT_TRAITS.to_owned(),
            stats: Self::DEFAULT_STATS.to_owned(),
            metadata: Self::DEFAULT_METADATA.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Items revealed per page. Always at least 1.
    pub page_size: usize,
    /// Order used when nothing else is requested; omitted from URLs.
    pub default_sort: SortOrder,
}

impl ViewConfig {
    pub const DEFAULT_PAGE_SIZE: usize = 30;

    pub fn new() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            default_sort: SortOrder::default(),
        }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::new()
        }
    }

    /// Page size clamped to at least one item.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new()
    }
}
