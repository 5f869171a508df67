//! Worker tasks that back the runtime orchestration.
//!
//! The gallery worker owns the view state and runs every command to
//! completion before taking the next one. Fetches run on separate tasks and
//! report back through the worker's completion channel.

mod gallery;

pub use gallery::{Command, GalleryWorker};
