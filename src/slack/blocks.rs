//! Conversions from domain messages and modals to Slack Block Kit types.

use slack_morphism::prelude::{
    SlackBlock, SlackBlockPlainText, SlackBlockText, SlackMessageContent, SlackSectionBlock,
    SlackView,
};

use crate::models::message::{BlockText, ContentBlock, OutboundMessage};
use crate::models::modal::ModalDefinition;
use crate::{AppError, Result};

/// Build the Slack block for one content block.
#[must_use]
pub fn content_block(block: &ContentBlock) -> SlackBlock {
    let text = match block {
        ContentBlock::Section(BlockText::Markdown(text)) => {
            SlackBlockText::MarkDown(text.clone().into())
        }
        ContentBlock::Section(BlockText::Plain(text)) => {
            SlackBlockText::Plain(SlackBlockPlainText::new(text.clone()).with_emoji(true))
        }
    };
    SlackBlock::Section(SlackSectionBlock::new().with_text(text))
}

/// Build the message content for `chat.postMessage`.
#[must_use]
pub fn message_content(message: &OutboundMessage) -> SlackMessageContent {
    let blocks = if message.blocks.is_empty() {
        None
    } else {
        Some(message.blocks.iter().map(content_block).collect())
    };

    SlackMessageContent::new()
        .opt_text(message.text.clone())
        .opt_blocks(blocks)
}

/// Convert a modal definition into a `views.open` payload.
///
/// The definition already serializes as Block Kit JSON, so it is decoded
/// straight into the SDK's view type.
///
/// # Errors
///
/// Returns `AppError::Slack` if the SDK cannot decode the generated view.
pub fn modal_view(modal: &ModalDefinition) -> Result<SlackView> {
    serde_json::to_value(modal)
        .and_then(serde_json::from_value)
        .map_err(|err| AppError::Slack(format!("invalid modal view: {err}")))
}
