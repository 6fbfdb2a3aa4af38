//! Slack event handler sub-modules and the startup routing table.

pub mod keyword;
pub mod poll_shortcut;
pub mod poll_submission;

use crate::config::BotConfig;
use crate::slack::dispatcher::{EventDispatcher, Trigger};

use self::keyword::KeywordResponder;
use self::poll_shortcut::PollShortcutHandler;
use self::poll_submission::PollSubmissionHandler;

/// Build the dispatcher with the keyword responder and both poll handlers.
///
/// The shortcut handler opens its modal with the same callback id the
/// submission handler is registered under.
#[must_use]
pub fn default_dispatcher(config: &BotConfig) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Trigger::MessageText(config.keyword.clone()), KeywordResponder);
    dispatcher.register(
        Trigger::Shortcut(config.shortcut_callback_id.clone()),
        PollShortcutHandler::new(config.modal_callback_id.clone(), config.modal_title.clone()),
    );
    dispatcher.register(
        Trigger::ViewSubmission(config.modal_callback_id.clone()),
        PollSubmissionHandler,
    );
    dispatcher
}
