//! Line-oriented terminal frontend for the Kamigotchi gallery.
//!
//! It implements the `client_frontend_core::Frontend` trait.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a GalleryHandle for communication
//! - Does NOT own the Runtime
//! - Reads commands from stdin, submits them via the handle and prints the
//!   resulting view

mod app;
mod command;
mod config;
pub mod logging;
mod render;

pub use app::{CliFrontend, Flow, Session};
pub use command::{CliCommand, CommandError};
pub use config::CliConfig;

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
