//! Socket Mode callbacks and conversion of SDK payloads to [`InboundEvent`]s.
//!
//! Slack expects every envelope to be acknowledged within three seconds, and
//! the SDK sends the envelope ack when the callback returns. Dispatch
//! therefore always runs on its own task: push events return immediately,
//! interactions return as soon as the handler acknowledges, and handlers
//! finish their API calls after the ack.

use std::sync::Arc;

use slack_morphism::prelude::{
    SlackClient, SlackClientEventsUserState, SlackClientHyperHttpsConnector,
    SlackEventCallbackBody, SlackInteractionEvent, SlackInteractionShortcutEvent,
    SlackInteractionViewSubmissionEvent, SlackMessageEvent, SlackPushEventCallback, SlackView,
    SlackViewState,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::event::{
    InboundEvent, MessageEvent, ShortcutInvocation, SubmittedValue, ViewSubmission, ViewValues,
};
use crate::slack::api::Acknowledger;
use crate::slack::dispatcher::Dispatch;
use crate::state::AppState;

/// Convert a user-authored message. Returns `None` for subtyped messages
/// (bot posts, edits, joins) and messages without a sender, channel, or text.
#[must_use]
pub fn message_event(event: &SlackMessageEvent) -> Option<MessageEvent> {
    if event.subtype.is_some() {
        return None;
    }

    let user = event.sender.user.as_ref()?;
    let channel = event.origin.channel.as_ref()?;
    let text = event.content.as_ref().and_then(|content| content.text.clone())?;

    Some(MessageEvent {
        text,
        channel: channel.0.clone(),
        user: user.0.clone(),
        ts: event.origin.ts.0.clone(),
    })
}

/// Convert a global shortcut invocation.
#[must_use]
pub fn shortcut_event(event: &SlackInteractionShortcutEvent) -> ShortcutInvocation {
    ShortcutInvocation {
        callback_id: event.callback_id.0.clone(),
        trigger_id: event.trigger_id.0.clone(),
        user: event.user.id.0.clone(),
    }
}

/// Convert a modal submission. Returns `None` for Home tab views.
#[must_use]
pub fn view_submission_event(
    event: &SlackInteractionViewSubmissionEvent,
) -> Option<ViewSubmission> {
    let SlackView::Modal(modal) = &event.view.view else {
        return None;
    };

    Some(ViewSubmission {
        callback_id: modal
            .callback_id
            .as_ref()
            .map(|id| id.0.clone())
            .unwrap_or_default(),
        user: event.user.id.0.clone(),
        values: event
            .view
            .state_params
            .state
            .as_ref()
            .map(view_values)
            .unwrap_or_default(),
    })
}

fn view_values(state: &SlackViewState) -> ViewValues {
    state
        .values
        .iter()
        .map(|(block_id, actions)| {
            let actions = actions
                .iter()
                .map(|(action_id, value)| {
                    (
                        action_id.0.clone(),
                        SubmittedValue {
                            value: value.value.clone(),
                            selected_conversation: value
                                .selected_conversation
                                .as_ref()
                                .map(|id| id.0.clone()),
                        },
                    )
                })
                .collect();
            (block_id.0.clone(), actions)
        })
        .collect()
}

/// Convert an interaction payload the bot routes. Block actions, view
/// closures, and other interaction types yield `None`.
#[must_use]
pub fn interaction_event(event: &SlackInteractionEvent) -> Option<InboundEvent> {
    match event {
        SlackInteractionEvent::Shortcut(shortcut) => {
            Some(InboundEvent::Shortcut(shortcut_event(shortcut)))
        }
        SlackInteractionEvent::ViewSubmission(view) => {
            view_submission_event(view).map(InboundEvent::ViewSubmission)
        }
        _ => None,
    }
}

async fn app_state(state: &SlackClientEventsUserState) -> Option<Arc<AppState>> {
    let guard = state.read().await;
    guard.get_user_state::<Arc<AppState>>().cloned()
}

/// Handle push events (channel messages) delivered via Socket Mode.
///
/// # Errors
///
/// Never fails; handler errors are logged by [`AppState::dispatch`].
pub async fn handle_push_event(
    event: SlackPushEventCallback,
    _client: Arc<SlackClient<SlackClientHyperHttpsConnector>>,
    state: SlackClientEventsUserState,
) -> slack_morphism::UserCallbackResult<()> {
    let SlackEventCallbackBody::Message(message) = &event.event else {
        debug!("push event ignored");
        return Ok(());
    };
    let Some(inbound) = message_event(message) else {
        debug!("message without user text ignored");
        return Ok(());
    };
    let Some(app) = app_state(&state).await else {
        warn!("app state not available; cannot process message");
        return Ok(());
    };

    // The envelope ack is sent when this callback returns.
    drop(spawn_dispatch(
        app,
        InboundEvent::Message(inbound),
        Acknowledger::none(),
    ));
    Ok(())
}

/// Handle interactive payloads (shortcuts, modal submissions) delivered via
/// Socket Mode. Returns once the handler has acknowledged.
///
/// # Errors
///
/// Never fails; handler errors are logged by [`AppState::dispatch`].
pub async fn handle_interaction(
    event: SlackInteractionEvent,
    _client: Arc<SlackClient<SlackClientHyperHttpsConnector>>,
    state: SlackClientEventsUserState,
) -> slack_morphism::UserCallbackResult<()> {
    let Some(inbound) = interaction_event(&event) else {
        debug!("unhandled interaction event type");
        return Ok(());
    };
    let Some(app) = app_state(&state).await else {
        warn!("app state not available; cannot process interaction");
        return Ok(());
    };

    drop(dispatch_interaction(app, inbound).await);
    Ok(())
}

/// Run the dispatch of `event` on its own task.
pub fn spawn_dispatch(
    app: Arc<AppState>,
    event: InboundEvent,
    ack: Acknowledger,
) -> JoinHandle<Option<Dispatch>> {
    tokio::spawn(async move { app.dispatch(event, ack).await })
}

/// Dispatch an interaction and wait only until it is acknowledged.
///
/// Returns once the handler calls [`Acknowledger::ack`] or drops the
/// acknowledger (no matching handler, or a handler that failed before
/// acking). The returned handle resolves when the handler finishes.
pub async fn dispatch_interaction(
    app: Arc<AppState>,
    event: InboundEvent,
) -> JoinHandle<Option<Dispatch>> {
    let (ack, acked) = Acknowledger::channel();
    let task = spawn_dispatch(app, event, ack);
    if acked.await.is_err() {
        debug!("interaction completed without explicit acknowledgment");
    }
    task
}
