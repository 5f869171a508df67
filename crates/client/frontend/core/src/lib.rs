//! Cross-frontend primitives for presenting the gallery.
//!
//! Houses message logging, event handling, and view-model types that both the
//! CLI and future graphical clients can reuse.
pub mod config;
pub mod event;
pub mod frontend;
pub mod message;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact, MessageConsumer};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{
    CardView, ComparisonTray, FilterChip, FilterControls, FilterGroupView, FilterOption,
    GalleryFrame, ResultsHeader, TraitLine,
};
