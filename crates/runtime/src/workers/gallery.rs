//! Gallery worker that owns the authoritative [`GalleryView`].
//!
//! Receives commands from [`GalleryHandle`](crate::GalleryHandle), applies
//! them to the view, keeps the navigation history in step and publishes
//! [`Event`] notifications.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use gallery_core::{Catalog, GalleryError, Item, ItemId, SortOrder};

use crate::api::{LoadReport, RefreshOutcome, ViewSnapshot};
use crate::events::{DataEvent, Event, EventBus, RenderScope, ViewEvent};
use crate::source::{DataSource, SourceError};
use crate::view::{GalleryView, History, Page, Revalidation, ViewError, ViewQuery};

type LoadResult = std::result::Result<LoadReport, SourceError>;
type ViewResult<T> = std::result::Result<T, ViewError>;

/// Commands that can be sent to the gallery worker
pub enum Command {
    Snapshot {
        reply: oneshot::Sender<ViewSnapshot>,
    },
    /// Reply once the load in flight completes, or with the last outcome.
    AwaitLoad {
        reply: oneshot::Sender<LoadResult>,
    },
    SetSort {
        order: SortOrder,
        reply: oneshot::Sender<ViewResult<()>>,
    },
    ToggleFilter {
        category: String,
        value: String,
        reply: oneshot::Sender<ViewResult<()>>,
    },
    RemoveFilter {
        category: String,
        value: String,
        reply: oneshot::Sender<()>,
    },
    ClearFilters {
        reply: oneshot::Sender<()>,
    },
    RequestPage {
        reply: oneshot::Sender<Option<Page>>,
    },
    FinishPage {
        generation: u64,
        reply: oneshot::Sender<bool>,
    },
    Lookup {
        id: String,
        reply: oneshot::Sender<ViewResult<Item>>,
    },
    AddToComparison {
        id: String,
        reply: oneshot::Sender<ViewResult<ItemId>>,
    },
    RemoveFromComparison {
        id: ItemId,
        reply: oneshot::Sender<bool>,
    },
    ClearComparison {
        reply: oneshot::Sender<bool>,
    },
    Navigate {
        location: String,
        reply: oneshot::Sender<Revalidation>,
    },
    Back {
        reply: oneshot::Sender<Option<String>>,
    },
    Forward {
        reply: oneshot::Sender<Option<String>>,
    },
    /// Start a refresh. `done` receives the outcome if one was started.
    Refresh {
        reply: oneshot::Sender<RefreshOutcome>,
        done: Option<oneshot::Sender<LoadResult>>,
    },
}

/// Outcome of a fetch task.
struct LoadCompletion {
    refresh: bool,
    result: std::result::Result<Catalog, SourceError>,
}

/// Background task that processes gallery commands.
pub struct GalleryWorker {
    view: GalleryView,
    history: History,
    path: String,
    source: Arc<dyn DataSource>,
    command_rx: mpsc::Receiver<Command>,
    completion_tx: mpsc::Sender<LoadCompletion>,
    completion_rx: mpsc::Receiver<LoadCompletion>,
    event_bus: EventBus,
    /// Re-entrancy guard: a fetch is in flight.
    loading: bool,
    waiters: Vec<oneshot::Sender<LoadResult>>,
    last_load: Option<LoadResult>,
}

impl GalleryWorker {
    /// Creates a new gallery worker.
    ///
    /// `initial_location` is stored in the view and validated once the first
    /// load completes.
    pub fn new(
        mut view: GalleryView,
        path: String,
        initial_location: Option<String>,
        source: Arc<dyn DataSource>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let history = match initial_location {
            Some(location) => {
                view.apply_query(ViewQuery::parse(&location, view.default_sort()));
                History::new(location)
            }
            None => History::new(path.clone()),
        };
        let (completion_tx, completion_rx) = mpsc::channel(1);

        Self {
            view,
            history,
            path,
            source,
            command_rx,
            completion_tx,
            completion_rx,
            event_bus,
            loading: false,
            waiters: Vec::new(),
            last_load: None,
        }
    }

    /// Main worker loop. Starts the initial load and runs until every
    /// handle has been dropped.
    pub async fn run(mut self) {
        self.start_load(false);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
        }

        debug!(target: "runtime::worker", "gallery worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::AwaitLoad { reply } => {
                if self.loading {
                    self.waiters.push(reply);
                } else {
                    let outcome = match &self.last_load {
                        Some(outcome) => clone_outcome(outcome),
                        None => Err(SourceError::Load("no load has been started".into())),
                    };
                    let _ = reply.send(outcome);
                }
            }
            Command::SetSort { order, reply } => {
                let result = self.view.set_sort(order);
                let _ = reply.send(self.settle(result));
            }
            Command::ToggleFilter {
                category,
                value,
                reply,
            } => {
                let result = self.view.toggle_filter(&category, &value);
                let _ = reply.send(self.settle(result));
            }
            Command::RemoveFilter {
                category,
                value,
                reply,
            } => {
                let scope = self.view.remove_filter(&category, &value);
                self.commit(scope);
                let _ = reply.send(());
            }
            Command::ClearFilters { reply } => {
                let scope = self.view.clear_filters();
                self.commit(scope);
                let _ = reply.send(());
            }
            Command::RequestPage { reply } => {
                let page = self.view.request_page();
                if let Some(page) = &page {
                    debug!(
                        target: "runtime::worker",
                        start = page.start,
                        len = page.ids.len(),
                        total = page.total,
                        "page materialized"
                    );
                    self.publish(Event::View(ViewEvent::PageReady(page.clone())));
                }
                let _ = reply.send(page);
            }
            Command::FinishPage { generation, reply } => {
                let _ = reply.send(self.view.finish_page(generation));
            }
            Command::Lookup { id, reply } => {
                let result = self.view.lookup(&id).cloned();
                if let Err(err) = &result {
                    self.reject(err);
                }
                let _ = reply.send(result);
            }
            Command::AddToComparison { id, reply } => {
                let result = self.view.add_to_comparison(&id);
                match &result {
                    Ok(_) => self.commit(RenderScope::COMPARISON | RenderScope::LOCATION),
                    Err(err) => self.reject(err),
                }
                let _ = reply.send(result);
            }
            Command::RemoveFromComparison { id, reply } => {
                let removed = self.view.remove_from_comparison(&id);
                if removed {
                    self.commit(RenderScope::COMPARISON | RenderScope::LOCATION);
                }
                let _ = reply.send(removed);
            }
            Command::ClearComparison { reply } => {
                let cleared = self.view.clear_comparison();
                if cleared {
                    self.commit(RenderScope::COMPARISON | RenderScope::LOCATION);
                }
                let _ = reply.send(cleared);
            }
            Command::Navigate { location, reply } => {
                let revalidation = self.restore(&location);
                self.commit(RenderScope::ALL);
                let _ = reply.send(revalidation);
            }
            Command::Back { reply } => {
                let location = self.history.back().map(str::to_owned);
                if let Some(location) = &location {
                    self.restore(location);
                    self.announce(RenderScope::ALL);
                }
                let _ = reply.send(location);
            }
            Command::Forward { reply } => {
                let location = self.history.forward().map(str::to_owned);
                if let Some(location) = &location {
                    self.restore(location);
                    self.announce(RenderScope::ALL);
                }
                let _ = reply.send(location);
            }
            Command::Refresh { reply, done } => {
                if self.loading {
                    debug!(target: "runtime::worker", "refresh ignored; load in flight");
                    let _ = reply.send(RefreshOutcome::AlreadyRunning);
                    return;
                }
                if let Some(done) = done {
                    self.waiters.push(done);
                }
                self.start_load(true);
                let _ = reply.send(RefreshOutcome::Started);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    fn start_load(&mut self, refresh: bool) {
        self.loading = true;
        info!(
            target: "runtime::worker",
            source = %self.source.describe(),
            refresh,
            "loading collection data"
        );
        self.publish(Event::Data(DataEvent::LoadStarted { refresh }));

        let source = Arc::clone(&self.source);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = match source.fetch().await {
                Ok(sources) => {
                    tokio::task::spawn_blocking(move || Catalog::from_sources(sources))
                        .await
                        .map_err(SourceError::Join)
                }
                Err(err) => Err(err),
            };
            // The worker may have stopped; nothing to report to then.
            let _ = completion_tx.send(LoadCompletion { refresh, result }).await;
        });
    }

    fn handle_completion(&mut self, completion: LoadCompletion) {
        self.loading = false;
        let LoadCompletion { refresh, result } = completion;

        let outcome = match result {
            Ok(catalog) => Ok(self.install(catalog, refresh)),
            Err(err) => {
                error!(
                    target: "runtime::worker",
                    error = %err,
                    refresh,
                    "collection load failed; keeping previous data"
                );
                self.publish(Event::Data(DataEvent::LoadFailed {
                    message: err.to_string(),
                }));
                Err(err)
            }
        };

        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(clone_outcome(&outcome));
        }
        self.last_load = Some(outcome);
    }

    fn install(&mut self, catalog: Catalog, refresh: bool) -> LoadReport {
        let corpus = catalog.corpus();
        let skipped = corpus.skipped().to_vec();
        if !skipped.is_empty() {
            warn!(
                target: "runtime::worker",
                count = skipped.len(),
                first = %skipped[0],
                "items without an image are ranked but not shown"
            );
        }
        info!(
            target: "runtime::worker",
            items = catalog.len(),
            ranked = catalog.rarity().len(),
            categories = catalog.occurrences().categories().count(),
            "rarity calculation complete"
        );

        let report_base = (catalog.len(), corpus.has_stats(), corpus.has_new_ids());
        let revalidation = self.view.install(Arc::new(catalog));
        if !revalidation.is_empty() {
            info!(
                target: "runtime::worker",
                dropped_filters = revalidation.dropped_filters.len(),
                dropped_selection = revalidation.dropped_selection.len(),
                sort_reset = ?revalidation.sort_reset,
                "dropped view state that no longer resolves"
            );
        }

        let (items, has_stats, has_new_ids) = report_base;
        self.publish(Event::Data(DataEvent::Loaded {
            items,
            skipped: skipped.clone(),
            has_stats,
            has_new_ids,
            revalidation: revalidation.clone(),
        }));

        if refresh {
            self.commit(RenderScope::ALL);
        } else {
            // The initial location may have been normalized; do not add an
            // entry for it.
            self.history.replace(self.view.location(&self.path));
            self.announce(RenderScope::ALL);
        }

        LoadReport {
            items,
            skipped: skipped.len(),
            has_stats,
            has_new_ids,
            revalidation,
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn restore(&mut self, location: &str) -> Revalidation {
        let query = ViewQuery::parse(location, self.view.default_sort());
        self.view.apply_query(query)
    }

    /// Publishes and records the result of a fallible transition.
    fn settle(&mut self, result: ViewResult<RenderScope>) -> ViewResult<()> {
        match result {
            Ok(scope) => {
                self.commit(scope);
                Ok(())
            }
            Err(err) => {
                self.reject(&err);
                Err(err)
            }
        }
    }

    /// Pushes the new location and announces the change.
    fn commit(&mut self, scope: RenderScope) {
        if scope.is_empty() {
            return;
        }
        if scope.contains(RenderScope::LOCATION) {
            self.history.push(self.view.location(&self.path));
        }
        self.announce(scope);
    }

    fn announce(&self, scope: RenderScope) {
        debug!(
            target: "runtime::worker",
            scope = ?scope,
            mode = ?self.view.mode(),
            sort = %self.view.sort_order(),
            "view changed"
        );
        self.publish(Event::View(ViewEvent::Changed {
            scope,
            mode: self.view.mode(),
            sort: self.view.sort_order(),
            total: self.view.active_order().len(),
            location: self.view.location(&self.path),
        }));
    }

    fn reject(&self, err: &ViewError) {
        debug!(target: "runtime::worker", error = %err, "action rejected");
        self.publish(Event::View(ViewEvent::Rejected {
            code: err.error_code(),
            message: err.to_string(),
        }));
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            catalog: Arc::clone(self.view.catalog()),
            ready: self.view.is_ready(),
            loading: self.loading,
            mode: self.view.mode(),
            sort: self.view.sort_order(),
            default_sort: self.view.default_sort(),
            filter: self.view.filter().clone(),
            total: self.view.active_order().len(),
            visible: self.view.visible().to_vec(),
            comparison: self.view.comparison().iter().cloned().collect(),
            location: self.view.location(&self.path),
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            load_error: match &self.last_load {
                Some(Err(err)) => Some(err.to_string()),
                _ => None,
            },
        }
    }
}

/// Load outcomes go to several waiters; errors are re-created from their
/// message because task join errors cannot be cloned.
fn clone_outcome(outcome: &LoadResult) -> LoadResult {
    match outcome {
        Ok(report) => Ok(report.clone()),
        Err(SourceError::Load(message)) => Err(SourceError::Load(message.clone())),
        Err(err) => Err(SourceError::Load(err.to_string())),
    }
}
