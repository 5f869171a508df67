//! Data-file loaders for the gallery.
//!
//! This crate reads the static collection files and the gallery
//! configuration:
//! - Image URLs (JSON, mandatory)
//! - Trait assignments (JSON, mandatory)
//! - Stat blocks (JSON, optional)
//! - New-ID metadata (JSON, optional)
//! - Gallery configuration (TOML)
//!
//! Loaders deserialize straight into gallery-core types. [`ContentFactory`]
//! assembles them into [`gallery_core::CorpusSources`], failing only when a
//! mandatory file is unusable.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, ImageLoader, MetadataLoader, StatsLoader, TraitLoader,
};
