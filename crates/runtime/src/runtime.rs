//! High-level runtime orchestrator.
//!
//! The runtime owns the gallery worker, wires up the command channel and the
//! event bus, and exposes a builder-based API for clients.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use gallery_core::{DataFiles, ViewConfig};

use crate::api::{GalleryHandle, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::source::{DataSource, FileDataSource};
use crate::view::GalleryView;
use crate::workers::{Command, GalleryWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub view: ViewConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Path component of every location the runtime produces.
    pub path: String,
    /// Location to restore once the first load completes.
    pub initial_location: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            path: "/".to_owned(),
            initial_location: None,
        }
    }
}

/// Main runtime that hosts the gallery worker.
///
/// [`GalleryHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: GalleryHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> GalleryHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every outstanding [`GalleryHandle`] clone has
    /// been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    source: Option<Arc<dyn DataSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            source: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the data source (required)
    pub fn source(mut self, source: impl DataSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Read collection files from `data_dir` using `files` for their names.
    pub fn data_dir(self, data_dir: impl Into<PathBuf>, files: DataFiles) -> Self {
        self.source(FileDataSource::with_files(data_dir, files))
    }

    /// Build the runtime and start the initial load.
    pub async fn build(self) -> Result<Runtime> {
        let source = self.source.ok_or(RuntimeError::MissingSource)?;
        let RuntimeConfig {
            view,
            event_buffer_size,
            command_buffer_size,
            path,
            initial_location,
        } = self.config;

        let (command_tx, command_rx) = mpsc::channel::<Command>(command_buffer_size);
        let event_bus = EventBus::with_capacity(event_buffer_size);
        let handle = GalleryHandle::new(command_tx, event_bus.clone());

        let worker = GalleryWorker::new(
            GalleryView::new(&view),
            path,
            initial_location,
            source,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
