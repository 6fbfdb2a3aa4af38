//! Keyword responder.
//!
//! Replies in the same channel when a message's text is exactly the
//! configured keyword. Fire-and-forget: no acknowledgment, no retry.

use tracing::info;

use crate::models::event::InboundEvent;
use crate::models::message::OutboundMessage;
use crate::slack::dispatcher::{EventHandler, HandlerContext, HandlerFuture};

/// Greeting posted in reply to the keyword.
#[must_use]
pub fn greeting(user_id: &str) -> String {
    format!("Hello, <@{user_id}>! :smile:")
}

/// Handler for [`Trigger::MessageText`](crate::slack::dispatcher::Trigger::MessageText).
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordResponder;

impl EventHandler for KeywordResponder {
    fn name(&self) -> &'static str {
        "keyword_responder"
    }

    fn handle(&self, ctx: HandlerContext) -> HandlerFuture<'_> {
        Box::pin(async move {
            let InboundEvent::Message(message) = ctx.event else {
                return Ok(());
            };

            let reply = OutboundMessage::plain(message.channel, greeting(&message.user));
            let posted = ctx.api.post_message(reply).await?;
            info!(
                channel = %posted.channel,
                ts = %posted.ts,
                user = %message.user,
                "replied to keyword"
            );
            Ok(())
        })
    }
}
