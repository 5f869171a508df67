//! View state: the active collection, pagination, comparison set and the
//! URL form of all of it.
//!
//! [`GalleryView`] is a plain synchronous state machine. The gallery worker
//! owns exactly one and applies every command to it in arrival order, so no
//! locking happens here.

mod controller;
mod error;
mod history;
mod query;

pub use controller::{GalleryView, Page, Revalidation, ViewMode};
pub use error::ViewError;
pub use history::History;
pub use query::{SELECT_PARAM, SORT_PARAM, ViewQuery};
