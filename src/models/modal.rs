//! Modal form definitions.
//!
//! The types serialize to Slack Block Kit JSON so a definition can be handed
//! to `views.open` unchanged.

use serde::Serialize;

/// Block Kit `plain_text` composition object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "plain_text")]
pub struct PlainText {
    /// Displayed text.
    pub text: String,
    /// Whether `:emoji:` shortcodes are rendered.
    pub emoji: bool,
}

impl PlainText {
    /// Plain text with emoji rendering enabled.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emoji: true,
        }
    }
}

/// Conversation types a conversation picker may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    /// Multi-person direct messages.
    Mpim,
    /// Public channels.
    Public,
}

/// Filter applied to a conversation picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationFilter {
    /// Conversation types to include.
    pub include: Vec<ConversationKind>,
    /// Hide bot users from the picker.
    pub exclude_bot_users: bool,
}

/// Interactive element inside an input block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    /// Single-line free text.
    PlainTextInput {
        /// Key of the value inside the block's submitted state.
        action_id: String,
    },
    /// Conversation picker.
    ConversationsSelect {
        /// Key of the value inside the block's submitted state.
        action_id: String,
        /// Hint shown before a selection is made.
        placeholder: PlainText,
        /// Which conversations are offered.
        filter: ConversationFilter,
    },
}

impl InputElement {
    /// Action id of this element.
    #[must_use]
    pub fn action_id(&self) -> &str {
        match self {
            Self::PlainTextInput { action_id } | Self::ConversationsSelect { action_id, .. } => {
                action_id
            }
        }
    }
}

/// Labelled input block of a modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "input")]
pub struct InputBlock {
    /// Stable id used to look the value up on submission.
    pub block_id: String,
    /// Label shown above the element.
    pub label: PlainText,
    /// The interactive element.
    pub element: InputElement,
}

/// A modal view ready to be opened with a trigger id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "modal")]
pub struct ModalDefinition {
    /// Routes the eventual submission back to a handler.
    pub callback_id: String,
    /// Modal title.
    pub title: PlainText,
    /// Submit button label.
    pub submit: PlainText,
    /// Close button label.
    pub close: PlainText,
    /// Input blocks in display order.
    pub blocks: Vec<InputBlock>,
}

impl ModalDefinition {
    /// Create an empty modal with `Submit` / `Close` buttons.
    #[must_use]
    pub fn new(callback_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            callback_id: callback_id.into(),
            title: PlainText::new(title),
            submit: PlainText::new("Submit"),
            close: PlainText::new("Close"),
            blocks: Vec::new(),
        }
    }

    /// Append an input block.
    #[must_use]
    pub fn with_input(
        mut self,
        block_id: impl Into<String>,
        label: impl Into<String>,
        element: InputElement,
    ) -> Self {
        self.blocks.push(InputBlock {
            block_id: block_id.into(),
            label: PlainText::new(label),
            element,
        });
        self
    }

    /// Find an input block by id.
    #[must_use]
    pub fn block(&self, block_id: &str) -> Option<&InputBlock> {
        self.blocks.iter().find(|block| block.block_id == block_id)
    }
}
