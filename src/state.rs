//! Shared state handed to Socket Mode callbacks.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::models::event::InboundEvent;
use crate::slack::api::{Acknowledger, SlackApi};
use crate::slack::dispatcher::{Dispatch, EventDispatcher};
use crate::AppError;

/// Immutable routing table plus the outbound API handle.
///
/// Handlers share nothing mutable, so callbacks running concurrently on
/// different tasks need no locking.
pub struct AppState {
    /// Handler registry.
    pub dispatcher: EventDispatcher,
    /// Outbound Slack API.
    pub api: Arc<dyn SlackApi>,
}

impl AppState {
    /// Create state from a dispatcher and an API handle.
    #[must_use]
    pub fn new(dispatcher: EventDispatcher, api: Arc<dyn SlackApi>) -> Self {
        Self { dispatcher, api }
    }

    /// Dispatch one event and log its outcome.
    ///
    /// Handler errors end here: they are logged and never reported back to
    /// the user in chat. Returns `None` when the handler failed.
    pub async fn dispatch(&self, event: InboundEvent, ack: Acknowledger) -> Option<Dispatch> {
        let kind = event.kind().as_str();
        let user = event.user().to_owned();

        match self
            .dispatcher
            .dispatch(event, Arc::clone(&self.api), ack)
            .await
        {
            Ok(Dispatch::Handled(handler)) => {
                info!(handler, kind, user, "event handled");
                Some(Dispatch::Handled(handler))
            }
            Ok(Dispatch::Dropped) => Some(Dispatch::Dropped),
            Err(err @ AppError::SchemaMismatch(_)) => {
                error!(%err, kind, user, "handler payload does not match its modal definition");
                None
            }
            Err(err) => {
                warn!(%err, kind, user, "event handler failed");
                None
            }
        }
    }
}
