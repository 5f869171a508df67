//! Runtime orchestration for the Kamigotchi gallery.
//!
//! This crate wires together the data source abstraction, the view state
//! controller and the worker task into a cohesive runtime API. Consumers
//! embed [`Runtime`] to load the collection, subscribe to events, and drive
//! the view through [`GalleryHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`source`] fetches the raw collection files
//! - [`view`] holds the view state machine and its URL form
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod source;
pub mod view;

mod workers;

pub use api::{GalleryHandle, LoadReport, RefreshOutcome, Result, RuntimeError, ViewSnapshot};
pub use events::{DataEvent, Event, EventBus, RenderScope, Topic, ViewEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use source::{DataSource, FileDataSource, SourceError, StaticDataSource};
pub use view::{
    GalleryView, History, Page, Revalidation, SELECT_PARAM, SORT_PARAM, ViewError, ViewMode,
    ViewQuery,
};
