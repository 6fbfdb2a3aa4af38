//! Poll shortcut handler.
//!
//! Acknowledges the shortcut, then spends the invocation's trigger id on a
//! single `views.open` call carrying the poll form.

use tracing::info;

use crate::models::event::InboundEvent;
use crate::models::poll::poll_modal;
use crate::slack::dispatcher::{EventHandler, HandlerContext, HandlerFuture};

/// Handler for [`Trigger::Shortcut`](crate::slack::dispatcher::Trigger::Shortcut).
#[derive(Debug, Clone)]
pub struct PollShortcutHandler {
    modal_callback_id: String,
    modal_title: String,
}

impl PollShortcutHandler {
    /// Create a handler whose modal submits under `modal_callback_id`.
    #[must_use]
    pub fn new(modal_callback_id: impl Into<String>, modal_title: impl Into<String>) -> Self {
        Self {
            modal_callback_id: modal_callback_id.into(),
            modal_title: modal_title.into(),
        }
    }
}

impl EventHandler for PollShortcutHandler {
    fn name(&self) -> &'static str {
        "poll_shortcut"
    }

    fn handle(&self, mut ctx: HandlerContext) -> HandlerFuture<'_> {
        Box::pin(async move {
            ctx.ack.ack();

            let InboundEvent::Shortcut(shortcut) = ctx.event else {
                return Ok(());
            };

            let modal = poll_modal(&self.modal_callback_id, &self.modal_title);
            ctx.api.open_modal(shortcut.trigger_id, modal).await?;
            info!(
                user = %shortcut.user,
                callback_id = %self.modal_callback_id,
                "opened poll modal"
            );
            Ok(())
        })
    }
}
