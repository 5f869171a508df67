//! Top-level client tying the gallery runtime to a frontend.
//!
//! ```text
//! Client
//!   ├─→ Runtime  (gallery worker, event bus)
//!   └─→ Frontend (CLI; talks to the runtime through a GalleryHandle)
//! ```

mod builder;

pub use builder::ClientBuilder;

pub use client_frontend_core::Frontend;

use anyhow::Result;
use gallery_runtime::Runtime;

/// Owns the runtime for the lifetime of the frontend.
///
/// # Lifecycle
///
/// 1. `Client::builder()` collects the runtime and frontend
/// 2. `Client::run()` hands a [`GalleryHandle`](gallery_runtime::GalleryHandle) to the frontend
/// 3. When the frontend returns, the runtime is shut down and its worker joined
pub struct Client {
    runtime: Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Runs the frontend until it exits, then shuts the runtime down.
    ///
    /// A frontend error takes precedence over a shutdown error.
    pub async fn run(self) -> Result<()> {
        let Self {
            runtime,
            mut frontend,
        } = self;

        let frontend_result = frontend.run(runtime.handle()).await;
        if let Err(err) = &frontend_result {
            tracing::error!("Frontend error: {:#}", err);
        }

        let shutdown_result = runtime.shutdown().await;
        if let Err(err) = &shutdown_result {
            tracing::warn!("Runtime shutdown failed: {}", err);
        }

        frontend_result?;
        shutdown_result?;
        Ok(())
    }
}
