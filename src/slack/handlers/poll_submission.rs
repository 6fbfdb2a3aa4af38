//! Poll submission handler.
//!
//! Acknowledges the modal submission, posts the poll to the chosen
//! conversation, and adds one numbered reaction per option.
//!
//! Reactions are independent calls. A failed reaction is logged and the
//! remaining ones are still attempted; the posted message is never rolled
//! back, so a poll may end up with fewer than three voting reactions.
//! Submissions are not deduplicated: replaying one posts a second poll.

use tracing::{info, warn};

use crate::models::event::InboundEvent;
use crate::models::message::PostedMessage;
use crate::models::poll::{PollSubmission, VOTE_EMOJI};
use crate::slack::api::SlackApi;
use crate::slack::dispatcher::{EventHandler, HandlerContext, HandlerFuture};
use crate::Result;

/// Outcome of publishing a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReceipt {
    /// The posted poll message.
    pub message: PostedMessage,
    /// Reactions that were attached successfully, in the order attempted.
    pub reactions: Vec<&'static str>,
}

impl PollReceipt {
    /// Whether every voting reaction was attached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reactions.len() == VOTE_EMOJI.len()
    }
}

/// Post `poll` and attach the voting reactions `one`, `two`, `three`.
///
/// # Errors
///
/// Returns [`AppError::Slack`](crate::AppError::Slack) only when posting the
/// message fails. Reaction failures are logged and reflected in the receipt.
pub async fn publish_poll(api: &dyn SlackApi, poll: &PollSubmission) -> Result<PollReceipt> {
    let message = api.post_message(poll.to_message()).await?;
    info!(
        channel = %message.channel,
        ts = %message.ts,
        asker = %poll.asker,
        "posted poll"
    );

    let mut reactions = Vec::with_capacity(VOTE_EMOJI.len());
    for emoji in VOTE_EMOJI {
        match api.add_reaction(message.clone(), emoji.to_owned()).await {
            Ok(()) => reactions.push(emoji),
            Err(err) => {
                warn!(
                    %err,
                    emoji,
                    channel = %message.channel,
                    ts = %message.ts,
                    "failed to add vote reaction"
                );
            }
        }
    }

    Ok(PollReceipt { message, reactions })
}

/// Handler for [`Trigger::ViewSubmission`](crate::slack::dispatcher::Trigger::ViewSubmission).
#[derive(Debug, Default, Clone, Copy)]
pub struct PollSubmissionHandler;

impl EventHandler for PollSubmissionHandler {
    fn name(&self) -> &'static str {
        "poll_submission"
    }

    fn handle(&self, mut ctx: HandlerContext) -> HandlerFuture<'_> {
        Box::pin(async move {
            ctx.ack.ack();

            let InboundEvent::ViewSubmission(view) = ctx.event else {
                return Ok(());
            };

            let poll = PollSubmission::from_view(&view)?;
            let receipt = publish_poll(ctx.api.as_ref(), &poll).await?;
            if !receipt.is_complete() {
                warn!(
                    channel = %receipt.message.channel,
                    ts = %receipt.message.ts,
                    attached = receipt.reactions.len(),
                    "poll posted with missing vote reactions"
                );
            }
            Ok(())
        })
    }
}
