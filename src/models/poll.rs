//! Poll modal layout, submission extraction, and poll message formatting.

use crate::models::event::ViewSubmission;
use crate::models::message::{BlockText, ContentBlock, OutboundMessage};
use crate::models::modal::{
    ConversationFilter, ConversationKind, InputElement, ModalDefinition, PlainText,
};
use crate::{AppError, Result};

/// Block id of the conversation picker.
pub const TARGET_CONVERSATION_BLOCK: &str = "target_conversation";
/// Block id of the question input.
pub const QUESTION_BLOCK: &str = "poll_question";
/// Block ids of the three option inputs, in display order.
pub const OPTION_BLOCKS: [&str; 3] = ["option_1", "option_2", "option_3"];
/// Action id shared by every input element of the poll modal.
pub const INPUT_ACTION_ID: &str = "input";
/// Reaction names used as voting buttons, in the order they are added.
pub const VOTE_EMOJI: [&str; 3] = ["one", "two", "three"];

/// Build the poll form opened by the poll shortcut.
#[must_use]
pub fn poll_modal(callback_id: &str, title: &str) -> ModalDefinition {
    let mut modal = ModalDefinition::new(callback_id, title)
        .with_input(
            TARGET_CONVERSATION_BLOCK,
            "Select the conversation to publish your poll to:",
            InputElement::ConversationsSelect {
                action_id: INPUT_ACTION_ID.into(),
                placeholder: PlainText::new("Select a conversation"),
                filter: ConversationFilter {
                    include: vec![ConversationKind::Public, ConversationKind::Mpim],
                    exclude_bot_users: true,
                },
            },
        )
        .with_input(QUESTION_BLOCK, "Poll Question", text_input());

    for (index, block_id) in OPTION_BLOCKS.iter().enumerate() {
        modal = modal.with_input(*block_id, format!("Option {}", index + 1), text_input());
    }
    modal
}

fn text_input() -> InputElement {
    InputElement::PlainTextInput {
        action_id: INPUT_ACTION_ID.into(),
    }
}

/// Poll fields extracted from a submitted poll modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSubmission {
    /// User who submitted the form.
    pub asker: String,
    /// Conversation the poll is published to.
    pub channel: String,
    /// Poll question.
    pub question: String,
    /// The three answer options.
    pub options: [String; 3],
}

impl PollSubmission {
    /// Extract the poll fields from a view submission.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SchemaMismatch` naming the first block whose
    /// expected value is absent.
    pub fn from_view(view: &ViewSubmission) -> Result<Self> {
        let channel = view
            .value(TARGET_CONVERSATION_BLOCK, INPUT_ACTION_ID)
            .and_then(|value| value.selected_conversation.clone())
            .ok_or_else(|| missing(TARGET_CONVERSATION_BLOCK))?;
        let question = text_value(view, QUESTION_BLOCK)?;
        let options = [
            text_value(view, OPTION_BLOCKS[0])?,
            text_value(view, OPTION_BLOCKS[1])?,
            text_value(view, OPTION_BLOCKS[2])?,
        ];

        Ok(Self {
            asker: view.user.clone(),
            channel,
            question,
            options,
        })
    }

    /// Format the poll as a header block followed by one block per option.
    #[must_use]
    pub fn to_message(&self) -> OutboundMessage {
        let mut blocks = Vec::with_capacity(1 + self.options.len());
        blocks.push(ContentBlock::Section(BlockText::Markdown(format!(
            "<@{}> wants to know: *{}*",
            self.asker, self.question
        ))));
        blocks.extend(
            VOTE_EMOJI
                .iter()
                .zip(&self.options)
                .map(|(emoji, option)| {
                    ContentBlock::Section(BlockText::Plain(format!(":{emoji}: {option}")))
                }),
        );

        let mut message = OutboundMessage::with_blocks(self.channel.clone(), blocks);
        message.text = Some(format!("Poll: {}", self.question));
        message
    }
}

fn text_value(view: &ViewSubmission, block_id: &str) -> Result<String> {
    view.value(block_id, INPUT_ACTION_ID)
        .and_then(|value| value.value.clone())
        .ok_or_else(|| missing(block_id))
}

fn missing(block_id: &str) -> AppError {
    AppError::SchemaMismatch(format!(
        "block {block_id} has no {INPUT_ACTION_ID} value in view submission"
    ))
}
