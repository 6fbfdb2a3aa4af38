//! Outbound Slack API surface used by event handlers.
//!
//! [`SlackApi`] decouples handlers from the Socket Mode client so that the
//! poll workflow can run against any implementation of these calls.
//! [`Acknowledger`] is the handler's half of an interaction acknowledgment.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::oneshot;

use crate::models::message::{OutboundMessage, PostedMessage};
use crate::models::modal::ModalDefinition;
use crate::Result;

/// Boxed future returned by [`SlackApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Web API calls issued by handlers.
pub trait SlackApi: Send + Sync {
    /// Post a message (`chat.postMessage`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Slack`](crate::AppError::Slack) if Slack rejects the call.
    fn post_message(&self, message: OutboundMessage) -> ApiFuture<'_, PostedMessage>;

    /// Open a modal with a shortcut's trigger id (`views.open`).
    ///
    /// Trigger ids are single-use and expire within seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Slack`](crate::AppError::Slack) if the trigger id is
    /// expired or already consumed, or the view is rejected.
    fn open_modal(&self, trigger_id: String, modal: ModalDefinition) -> ApiFuture<'_, ()>;

    /// Attach an emoji reaction to a posted message (`reactions.add`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Slack`](crate::AppError::Slack) if the emoji is
    /// unknown or the bot lacks `reactions:write`.
    fn add_reaction(&self, message: PostedMessage, name: String) -> ApiFuture<'_, ()>;
}

/// Releases the Socket Mode envelope acknowledgment for one interaction.
///
/// The transport waits on the paired receiver and returns from its callback
/// as soon as [`Acknowledger::ack`] is called or the acknowledger is dropped.
#[derive(Debug)]
pub struct Acknowledger {
    tx: Option<oneshot::Sender<()>>,
}

impl Acknowledger {
    /// Create an acknowledger and the receiver the transport waits on.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Acknowledger for events that need no acknowledgment.
    #[must_use]
    pub fn none() -> Self {
        Self { tx: None }
    }

    /// Acknowledge the interaction. Returns `true` only on the first call
    /// that actually signalled the transport.
    pub fn ack(&mut self) -> bool {
        self.tx.take().is_some_and(|tx| tx.send(()).is_ok())
    }

    /// Whether an acknowledgment is still outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.tx.is_some()
    }
}
