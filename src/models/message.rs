//! Outbound chat messages and the handle of a posted message.

/// Text of a content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockText {
    /// Slack `mrkdwn` formatting.
    Markdown(String),
    /// Plain text with emoji shortcodes rendered.
    Plain(String),
}

impl BlockText {
    /// Raw text regardless of formatting.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Markdown(text) | Self::Plain(text) => text,
        }
    }
}

/// Display block of a posted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Section with a single text field.
    Section(BlockText),
}

impl ContentBlock {
    /// Text carried by the block.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Section(text) => text.as_str(),
        }
    }
}

/// A message to post with `chat.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Target conversation id.
    pub channel: String,
    /// Fallback text, also used alone when `blocks` is empty.
    pub text: Option<String>,
    /// Content blocks in display order.
    pub blocks: Vec<ContentBlock>,
}

impl OutboundMessage {
    /// Create a text-only message.
    #[must_use]
    pub fn plain(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: Some(text.into()),
            blocks: Vec::new(),
        }
    }

    /// Create a block message.
    #[must_use]
    pub fn with_blocks(channel: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            channel: channel.into(),
            text: None,
            blocks,
        }
    }
}

/// Identifies a posted message for follow-up calls such as `reactions.add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Conversation id the message landed in.
    pub channel: String,
    /// Message timestamp.
    pub ts: String,
}
