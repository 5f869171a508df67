//! Cloneable façade for issuing commands to the runtime.
//!
//! [`GalleryHandle`] hides channel plumbing and offers async helpers for
//! every view transition, pagination, refresh and navigation.
use tokio::sync::{broadcast, mpsc, oneshot};

use gallery_core::{Item, ItemId, SortOrder};

use super::errors::{Result, RuntimeError};
use super::snapshot::{LoadReport, RefreshOutcome, ViewSnapshot};
use crate::events::{Event, EventBus, Topic};
use crate::view::{Page, Revalidation};
use crate::workers::Command;

/// Client-facing handle to interact with the gallery
#[derive(Clone)]
pub struct GalleryHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl GalleryHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the current view state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<ViewSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Wait for the load in flight, or report the last completed one.
    pub async fn wait_until_loaded(&self) -> Result<LoadReport> {
        Ok(self.request(|reply| Command::AwaitLoad { reply }).await??)
    }

    pub async fn set_sort(&self, order: SortOrder) -> Result<()> {
        Ok(self
            .request(|reply| Command::SetSort { order, reply })
            .await??)
    }

    pub async fn toggle_filter(
        &self,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let (category, value) = (category.into(), value.into());
        Ok(self
            .request(|reply| Command::ToggleFilter {
                category,
                value,
                reply,
            })
            .await??)
    }

    /// Remove one active constraint (filter chip).
    pub async fn remove_filter(
        &self,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let (category, value) = (category.into(), value.into());
        self.request(|reply| Command::RemoveFilter {
            category,
            value,
            reply,
        })
        .await
    }

    pub async fn clear_filters(&self) -> Result<()> {
        self.request(|reply| Command::ClearFilters { reply }).await
    }

    /// Materialize the next page. `None` while another page is in flight or
    /// when everything is already visible.
    pub async fn request_page(&self) -> Result<Option<Page>> {
        self.request(|reply| Command::RequestPage { reply }).await
    }

    /// Report that a page was rendered, re-arming pagination.
    pub async fn finish_page(&self, generation: u64) -> Result<bool> {
        self.request(|reply| Command::FinishPage { generation, reply })
            .await
    }

    /// Resolve a user-typed ID.
    pub async fn lookup(&self, id: impl Into<String>) -> Result<Item> {
        let id = id.into();
        Ok(self.request(|reply| Command::Lookup { id, reply }).await??)
    }

    pub async fn add_to_comparison(&self, id: impl Into<String>) -> Result<ItemId> {
        let id = id.into();
        Ok(self
            .request(|reply| Command::AddToComparison { id, reply })
            .await??)
    }

    pub async fn remove_from_comparison(&self, id: ItemId) -> Result<bool> {
        self.request(|reply| Command::RemoveFromComparison { id, reply })
            .await
    }

    pub async fn clear_comparison(&self) -> Result<bool> {
        self.request(|reply| Command::ClearComparison { reply }).await
    }

    /// Open a location (deep link). The location is validated against the
    /// loaded collection and pushed onto the history.
    pub async fn navigate(&self, location: impl Into<String>) -> Result<Revalidation> {
        let location = location.into();
        self.request(|reply| Command::Navigate { location, reply })
            .await
    }

    /// Step back in history, re-hydrating the view without re-fetching.
    pub async fn back(&self) -> Result<Option<String>> {
        self.request(|reply| Command::Back { reply }).await
    }

    pub async fn forward(&self) -> Result<Option<String>> {
        self.request(|reply| Command::Forward { reply }).await
    }

    /// Start re-fetching the collection. Returns immediately.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        self.request(|reply| Command::Refresh { reply, done: None })
            .await
    }

    /// Re-fetch and wait for the outcome. `None` if a refresh was already
    /// running.
    pub async fn refresh_and_wait(&self) -> Result<Option<LoadReport>> {
        let (done_tx, done_rx) = oneshot::channel();
        let outcome = self
            .request(|reply| Command::Refresh {
                reply,
                done: Some(done_tx),
            })
            .await?;

        match outcome {
            RefreshOutcome::AlreadyRunning => Ok(None),
            RefreshOutcome::Started => {
                let report = done_rx.await.map_err(RuntimeError::ReplyChannelClosed)??;
                Ok(Some(report))
            }
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::View` - View transitions, pages and rejected actions
    /// - `Topic::Data` - Load and refresh progress
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gallery_runtime::Topic;
    ///
    /// let mut data_rx = handle.subscribe(Topic::Data);
    /// while let Ok(event) = data_rx.recv().await {
    ///     // Handle load events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
