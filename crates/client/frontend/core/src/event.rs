//! Utilities for reacting to runtime events inside UI layers.
use gallery_runtime::{DataEvent, Event, RenderScope, Revalidation, ViewEvent};

use crate::message::MessageLog;

/// What a consumed event requires from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventImpact {
    pub scope: RenderScope,
    pub new_messages: bool,
}

impl Default for EventImpact {
    fn default() -> Self {
        Self::none()
    }
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            scope: RenderScope::empty(),
            new_messages: false,
        }
    }

    pub const fn redraw(scope: RenderScope) -> Self {
        Self {
            scope,
            new_messages: false,
        }
    }

    pub const fn messages() -> Self {
        Self {
            scope: RenderScope::empty(),
            new_messages: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            scope: self.scope | other.scope,
            new_messages: self.new_messages || other.new_messages,
        }
    }

    pub fn requires_redraw(&self) -> bool {
        !self.scope.is_empty()
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
    fn take_message_log(self) -> MessageLog
    where
        Self: Sized;
}

/// Turns runtime events into user-facing messages and render scopes.
#[derive(Clone, Debug)]
pub struct MessageConsumer {
    log: MessageLog,
}

impl MessageConsumer {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: MessageLog::new(capacity),
        }
    }

    fn on_view(&mut self, event: &ViewEvent) -> EventImpact {
        match event {
            ViewEvent::Changed { scope, .. } => EventImpact::redraw(*scope),
            // Pages are rendered by whoever requested them.
            ViewEvent::PageReady(_) => EventImpact::none(),
            ViewEvent::Rejected { message, .. } => {
                self.log.error(message.clone());
                EventImpact::messages()
            }
        }
    }

    fn on_data(&mut self, event: &DataEvent) -> EventImpact {
        match event {
            DataEvent::LoadStarted { refresh: false } => {
                self.log.info("Loading Kamigotchi...");
                EventImpact::messages()
            }
            DataEvent::LoadStarted { refresh: true } => {
                self.log.info("Refreshing Kamigotchi...");
                EventImpact::messages()
            }
            DataEvent::Loaded {
                items,
                skipped,
                has_stats,
                revalidation,
                ..
            } => {
                self.log.info(format!("Loaded {items} Kamigotchi"));
                if !skipped.is_empty() {
                    self.log
                        .warn(format!("Skipped {} without an image", skipped.len()));
                }
                if !has_stats {
                    self.log.warn("Stats unavailable; stat sorting is disabled");
                }
                self.report_revalidation(revalidation);
                EventImpact::messages().combine(EventImpact::redraw(RenderScope::CONTROLS))
            }
            DataEvent::LoadFailed { message } => {
                self.log.error(message.clone());
                EventImpact::messages().combine(EventImpact::redraw(
                    RenderScope::RESULTS | RenderScope::HEADER,
                ))
            }
        }
    }

    fn report_revalidation(&mut self, revalidation: &Revalidation) {
        for (category, value) in &revalidation.dropped_filters {
            self.log
                .info(format!("Removed filter {category}: {value} (no longer present)"));
        }
        for id in &revalidation.dropped_selection {
            self.log
                .info(format!("Removed #{id} from comparison (no longer present)"));
        }
        if let Some(order) = revalidation.sort_reset {
            self.log
                .info(format!("Sorting by {order} is unavailable; using the default order"));
        }
    }
}

impl EventConsumer for MessageConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::View(event) => self.on_view(event),
            Event::Data(event) => self.on_data(event),
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}
