//! Inbound events normalized from Socket Mode payloads.
//!
//! Each variant carries only what a handler reads; the Slack SDK types are
//! converted at the transport edge in [`crate::slack::events`].

use std::collections::HashMap;

/// Discriminant of an [`InboundEvent`], used for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A message posted in a conversation the bot can see.
    Message,
    /// A global shortcut invocation.
    Shortcut,
    /// A modal form submission.
    ViewSubmission,
}

impl EventKind {
    /// Stable lowercase name for structured log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Shortcut => "shortcut",
            Self::ViewSubmission => "view_submission",
        }
    }
}

/// A user-authored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// Message text.
    pub text: String,
    /// Conversation the message was posted in.
    pub channel: String,
    /// Sender user id.
    pub user: String,
    /// Message timestamp.
    pub ts: String,
}

/// A shortcut invocation carrying a single-use trigger id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInvocation {
    /// Callback id configured for the shortcut in the Slack app manifest.
    pub callback_id: String,
    /// Single-use, short-lived token required by `views.open`.
    pub trigger_id: String,
    /// Invoking user id.
    pub user: String,
}

/// One submitted input element value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedValue {
    /// Text entered in a plain-text input.
    pub value: Option<String>,
    /// Conversation chosen in a conversation picker.
    pub selected_conversation: Option<String>,
}

impl SubmittedValue {
    /// Value of a plain-text input.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            selected_conversation: None,
        }
    }

    /// Value of a conversation picker.
    #[must_use]
    pub fn conversation(id: impl Into<String>) -> Self {
        Self {
            value: None,
            selected_conversation: Some(id.into()),
        }
    }
}

/// Submitted values keyed by block id, then action id.
pub type ViewValues = HashMap<String, HashMap<String, SubmittedValue>>;

/// A modal form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSubmission {
    /// Callback id the modal was opened with.
    pub callback_id: String,
    /// Submitting user id.
    pub user: String,
    /// Submitted input state.
    pub values: ViewValues,
}

impl ViewSubmission {
    /// Look up the value submitted for `block_id` / `action_id`.
    #[must_use]
    pub fn value(&self, block_id: &str, action_id: &str) -> Option<&SubmittedValue> {
        self.values.get(block_id).and_then(|block| block.get(action_id))
    }
}

/// Event delivered to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Plain message.
    Message(MessageEvent),
    /// Shortcut invocation.
    Shortcut(ShortcutInvocation),
    /// Modal submission.
    ViewSubmission(ViewSubmission),
}

impl InboundEvent {
    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message(_) => EventKind::Message,
            Self::Shortcut(_) => EventKind::Shortcut,
            Self::ViewSubmission(_) => EventKind::ViewSubmission,
        }
    }

    /// Id of the user who caused the event.
    #[must_use]
    pub fn user(&self) -> &str {
        match self {
            Self::Message(msg) => &msg.user,
            Self::Shortcut(shortcut) => &shortcut.user,
            Self::ViewSubmission(view) => &view.user,
        }
    }
}
