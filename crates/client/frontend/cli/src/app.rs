//! Glue code tying the gallery handle and the terminal together.
use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use client_frontend_core::{
    CardView, ComparisonTray, EventConsumer, FilterControls, Frontend, FrontendConfig,
    MessageConsumer, ResultsHeader,
};
use gallery_core::ItemId;
use gallery_runtime::{
    DataEvent, Event, GalleryHandle, RefreshOutcome, RuntimeError, Topic, ViewMode,
};

use crate::command::{CliCommand, HELP};
use crate::config::CliConfig;
use crate::render;

/// Whether the prompt loop keeps going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal frontend reading commands from stdin.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: GalleryHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        let mut session = Session::new(
            handle,
            &self.frontend_config,
            &self.cli_config,
            std::io::stdout(),
        );
        session.start().await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            session.prompt()?;
            let flow = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => session.execute_line(&line).await?,
                    None => Flow::Quit,
                },
                event = session.next_event() => session.on_background_event(event)?,
            };
            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!("CLI frontend exiting");
        Ok(())
    }
}

/// One interactive session writing to `out`.
pub struct Session<W: Write> {
    handle: GalleryHandle,
    view_rx: broadcast::Receiver<Event>,
    data_rx: broadcast::Receiver<Event>,
    consumer: MessageConsumer,
    title: String,
    cli_config: CliConfig,
    out: W,
}

impl<W: Write> Session<W> {
    /// Subscribes to the runtime's topics; events published before this call
    /// are not seen.
    pub fn new(
        handle: GalleryHandle,
        frontend_config: &FrontendConfig,
        cli_config: &CliConfig,
        out: W,
    ) -> Self {
        let view_rx = handle.subscribe(Topic::View);
        let data_rx = handle.subscribe(Topic::Data);
        Self {
            handle,
            view_rx,
            data_rx,
            consumer: MessageConsumer::new(frontend_config.messages.capacity),
            title: frontend_config.title.clone(),
            cli_config: cli_config.clone(),
            out,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Prints the banner, waits for the first load and shows the first page.
    pub async fn start(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.title)?;
        writeln!(self.out, "Type `help` for commands.")?;

        match self.handle.wait_until_loaded().await {
            Ok(_) => {
                self.flush_events()?;
                self.show_results().await
            }
            Err(RuntimeError::Source(err)) => {
                self.flush_events()?;
                writeln!(self.out, "Could not load the collection: {err}")?;
                writeln!(self.out, "Type `refresh` to try again.")?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    pub async fn execute_line(&mut self, line: &str) -> Result<Flow> {
        match CliCommand::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute(&mut self, command: CliCommand) -> Result<Flow> {
        tracing::debug!(?command, "executing command");

        match command {
            CliCommand::More => self.show_more().await?,
            CliCommand::Sort(order) => {
                let changed = accepted(self.handle.set_sort(order).await)?;
                self.after_transition(changed.is_some()).await?;
            }
            CliCommand::Filter { category, value } => {
                let changed = accepted(self.handle.toggle_filter(category, value).await)?;
                self.after_transition(changed.is_some()).await?;
            }
            CliCommand::Unfilter { category, value } => {
                self.handle.remove_filter(category, value).await?;
                self.after_transition(true).await?;
            }
            CliCommand::ClearFilters => {
                self.handle.clear_filters().await?;
                self.after_transition(true).await?;
            }
            CliCommand::Add(id) => {
                let added = accepted(self.handle.add_to_comparison(id).await)?;
                self.flush_events()?;
                if added.is_some() {
                    self.show_tray().await?;
                }
            }
            CliCommand::Remove(id) => {
                let removed = self
                    .handle
                    .remove_from_comparison(ItemId::from(id.trim()))
                    .await?;
                self.flush_events()?;
                if removed {
                    self.show_tray().await?;
                } else {
                    writeln!(self.out, "#{} is not in the comparison tray", id.trim())?;
                }
            }
            CliCommand::ClearSelection => {
                self.handle.clear_comparison().await?;
                self.flush_events()?;
                self.show_tray().await?;
            }
            CliCommand::Show(id) => {
                let item = accepted(self.handle.lookup(id).await)?;
                self.flush_events()?;
                if let Some(item) = item {
                    let snapshot = self.handle.snapshot().await?;
                    let card = CardView::build(&snapshot.catalog, &item, snapshot.sort, false);
                    writeln!(self.out, "{}", render::card(&card, self.cli_config.ui.show_images))?;
                }
            }
            CliCommand::Traits { category, search } => {
                self.show_traits(category, search).await?;
            }
            CliCommand::Refresh => match self.handle.refresh().await? {
                RefreshOutcome::Started => self.flush_events()?,
                RefreshOutcome::AlreadyRunning => {
                    writeln!(self.out, "A refresh is already running")?;
                }
            },
            CliCommand::Url => {
                let snapshot = self.handle.snapshot().await?;
                writeln!(self.out, "{}", snapshot.location)?;
            }
            CliCommand::Open(location) => {
                self.handle.navigate(location).await?;
                self.after_transition(true).await?;
            }
            CliCommand::Back => {
                let location = self.handle.back().await?;
                self.after_history_move(location, "back").await?;
            }
            CliCommand::Forward => {
                let location = self.handle.forward().await?;
                self.after_history_move(location, "forward").await?;
            }
            CliCommand::Help => writeln!(self.out, "{HELP}")?,
            CliCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Waits for the next runtime event on any subscribed topic.
    pub async fn next_event(&mut self) -> Result<Event, RecvError> {
        tokio::select! {
            event = self.view_rx.recv() => event,
            event = self.data_rx.recv() => event,
        }
    }

    /// Handles an event that arrived while waiting for input, such as the
    /// completion of a refresh.
    pub fn on_background_event(&mut self, event: Result<Event, RecvError>) -> Result<Flow> {
        match event {
            Ok(event) => {
                self.consumer.on_event(&event);
                self.print_messages()?;
                if let Event::Data(DataEvent::Loaded { .. }) = event {
                    writeln!(self.out, "Collection reloaded; type `more` to browse.")?;
                }
                Ok(Flow::Continue)
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                Ok(Flow::Continue)
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                Ok(Flow::Quit)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    async fn after_transition(&mut self, changed: bool) -> Result<()> {
        self.flush_events()?;
        if changed {
            self.show_results().await?;
        }
        Ok(())
    }

    async fn after_history_move(&mut self, location: Option<String>, direction: &str) -> Result<()> {
        match location {
            Some(location) => {
                writeln!(self.out, "{location}")?;
                self.after_transition(true).await
            }
            None => {
                writeln!(self.out, "Nothing to go {direction} to")?;
                Ok(())
            }
        }
    }

    /// Header plus the first page of the active collection.
    async fn show_results(&mut self) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        if !snapshot.ready {
            if let Some(error) = &snapshot.load_error {
                writeln!(self.out, "Could not load the collection: {error}")?;
            }
            return Ok(());
        }

        writeln!(self.out, "{}", render::header(&ResultsHeader::from_snapshot(&snapshot)))?;
        if snapshot.mode != ViewMode::NoMatches && snapshot.visible.is_empty() {
            self.show_more().await?;
        }
        Ok(())
    }

    async fn show_more(&mut self) -> Result<()> {
        let Some(page) = self.handle.request_page().await? else {
            self.flush_events()?;
            writeln!(self.out, "No more Kamigotchi to show")?;
            return Ok(());
        };
        self.flush_events()?;

        let snapshot = self.handle.snapshot().await?;
        for id in &page.ids {
            if let Some(item) = snapshot.catalog.item(id) {
                let card = CardView::build(&snapshot.catalog, item, snapshot.sort, false);
                writeln!(self.out, "{}", render::card(&card, self.cli_config.ui.show_images))?;
            }
        }
        self.handle.finish_page(page.generation).await?;

        let remaining = page.total.saturating_sub(page.end());
        if remaining > 0 {
            writeln!(self.out, "{remaining} more; type `more` to continue")?;
        }
        Ok(())
    }

    async fn show_tray(&mut self) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        let tray = ComparisonTray::from_snapshot(&snapshot);
        writeln!(self.out, "{}", render::tray(&tray, self.cli_config.ui.show_images))?;
        Ok(())
    }

    async fn show_traits(&mut self, category: Option<String>, search: Option<String>) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        let mut controls = FilterControls::build(&snapshot.catalog, &snapshot.filter);

        match category {
            None => writeln!(self.out, "{}", render::controls_summary(&controls))?,
            Some(category) => match controls.group_mut(&category) {
                Some(group) => {
                    if let Some(search) = search {
                        group.set_search(search);
                    }
                    writeln!(self.out, "{}", render::group(group))?;
                }
                None => writeln!(self.out, "No trait category named `{category}`")?,
            },
        }
        Ok(())
    }

    /// Feeds already-published events to the consumer and prints new
    /// messages. The worker publishes before replying, so a command's own
    /// events are available once its reply arrived.
    fn flush_events(&mut self) -> Result<()> {
        for rx in [&mut self.view_rx, &mut self.data_rx] {
            loop {
                match rx.try_recv() {
                    Ok(event) => {
                        self.consumer.on_event(&event);
                    }
                    Err(TryRecvError::Lagged(skipped)) => {
                        tracing::warn!("Dropped {} stale events", skipped);
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        self.print_messages()
    }

    fn print_messages(&mut self) -> Result<()> {
        let unread = self.consumer.message_log_mut().take_unread();
        let skip = unread.len().saturating_sub(self.cli_config.ui.message_lines);
        for entry in unread.iter().skip(skip) {
            writeln!(self.out, "{}", render::message(entry))?;
        }
        Ok(())
    }
}

/// Splits rejected view actions, which the consumer reports from their
/// event, from runtime failures.
fn accepted<T>(result: gallery_runtime::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RuntimeError::View(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
