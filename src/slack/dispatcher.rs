//! Ordered event routing table.
//!
//! Handlers are registered at startup as `(Trigger, handler)` pairs. Each
//! inbound event goes to the first registered handler whose trigger matches;
//! events nothing matches are dropped.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::event::InboundEvent;
use crate::slack::api::{Acknowledger, SlackApi};
use crate::Result;

/// Predicate deciding whether a handler receives an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Message whose text equals this string exactly.
    MessageText(String),
    /// Shortcut invocation with this callback id.
    Shortcut(String),
    /// View submission with this callback id.
    ViewSubmission(String),
}

impl Trigger {
    /// Whether `event` satisfies this trigger.
    #[must_use]
    pub fn matches(&self, event: &InboundEvent) -> bool {
        match (self, event) {
            (Self::MessageText(text), InboundEvent::Message(msg)) => msg.text == *text,
            (Self::Shortcut(id), InboundEvent::Shortcut(shortcut)) => shortcut.callback_id == *id,
            (Self::ViewSubmission(id), InboundEvent::ViewSubmission(view)) => {
                view.callback_id == *id
            }
            _ => false,
        }
    }
}

/// Everything a handler receives for one event.
pub struct HandlerContext {
    /// The event being handled.
    pub event: InboundEvent,
    /// Outbound API handle.
    pub api: Arc<dyn SlackApi>,
    /// Interaction acknowledgment, pending until the handler calls `ack`.
    pub ack: Acknowledger,
}

/// Boxed future returned by [`EventHandler::handle`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// A unit of event-handling logic.
pub trait EventHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns the first error that stopped the handler.
    fn handle(&self, ctx: HandlerContext) -> HandlerFuture<'_>;
}

/// Result of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The named handler ran to completion.
    Handled(&'static str),
    /// No trigger matched.
    Dropped,
}

struct Route {
    trigger: Trigger,
    handler: Arc<dyn EventHandler>,
}

/// Registry of handlers evaluated in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    routes: Vec<Route>,
}

impl EventDispatcher {
    /// Create an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events matching `trigger`.
    pub fn register<H>(&mut self, trigger: Trigger, handler: H)
    where
        H: EventHandler + 'static,
    {
        info!(handler = handler.name(), ?trigger, "registered event handler");
        self.routes.push(Route {
            trigger,
            handler: Arc::new(handler),
        });
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route `event` to the first matching handler.
    ///
    /// # Errors
    ///
    /// Propagates the matched handler's error.
    pub async fn dispatch(
        &self,
        event: InboundEvent,
        api: Arc<dyn SlackApi>,
        ack: Acknowledger,
    ) -> Result<Dispatch> {
        let Some(route) = self.routes.iter().find(|route| route.trigger.matches(&event)) else {
            debug!(
                kind = event.kind().as_str(),
                user = event.user(),
                "no handler matched; dropping event"
            );
            return Ok(Dispatch::Dropped);
        };

        let name = route.handler.name();
        debug!(
            handler = name,
            kind = event.kind().as_str(),
            user = event.user(),
            "dispatching event"
        );
        route
            .handler
            .handle(HandlerContext { event, api, ack })
            .await?;
        Ok(Dispatch::Handled(name))
    }
}
