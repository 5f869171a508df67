//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use gallery_runtime::GalleryHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the gallery via [`GalleryHandle`]:
/// - Subscribe to events (View, Data)
/// - Submit sort, filter, pagination and comparison requests
/// - Query snapshots of the current view
///
/// Frontends do NOT own the Runtime - they receive a handle for communication only.
///
/// # Example Implementation
///
/// ```no_run
/// use async_trait::async_trait;
/// use client_frontend_core::Frontend;
/// use gallery_runtime::{GalleryHandle, Topic};
/// use anyhow::Result;
///
/// struct MyFrontend;
///
/// #[async_trait]
/// impl Frontend for MyFrontend {
///     async fn run(&mut self, handle: GalleryHandle) -> Result<()> {
///         let mut events = handle.subscribe(Topic::View);
///
///         while let Ok(event) = events.recv().await {
///             // Render, read input, etc.
///         }
///
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: GalleryHandle) -> Result<()>;
}
