//! Collection data model and ranking logic shared across the gallery.
//!
//! `gallery-core` defines the canonical item types (IDs, trait values, stat
//! blocks), the corpus built from the static data files, and the pure engines
//! that derive everything else from it: trait occurrence counts, rarity
//! scores, sort orders and trait filters. [`Catalog`] bundles a corpus with
//! its derived statistics so consumers can never observe one without the
//! other.
pub mod catalog;
pub mod config;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod item;
pub mod occurrence;
pub mod rarity;
pub mod sort;

pub use catalog::Catalog;
pub use config::{DataFiles, GalleryConfig, ViewConfig};
pub use corpus::{Corpus, CorpusSources};
pub use error::{ErrorSeverity, GalleryError, ParseSortError, SelectionError};
pub use filter::TraitFilter;
pub use item::{Item, ItemId, StatBlock, StatKind, TraitDetail, TraitValue};
pub use occurrence::TraitOccurrences;
pub use rarity::{RarityRecord, RarityTable, RarityTier};
pub use sort::{SortOrder, sort_ids};
