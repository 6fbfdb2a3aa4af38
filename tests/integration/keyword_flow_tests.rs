//! Integration tests for the keyword responder flow.
//!
//! Drives messages through the default routing table and checks the single
//! greeting reply, and that any other text is dropped without API calls.

use slack_poll_bot::models::message::OutboundMessage;
use slack_poll_bot::slack::api::Acknowledger;
use slack_poll_bot::slack::dispatcher::Dispatch;

use super::test_helpers::{message, test_app_state, test_app_state_with, RecordingSlackApi};

#[tokio::test]
async fn keyword_gets_one_greeting_in_same_channel() {
    let (api, state) = test_app_state();

    let outcome = state
        .dispatch(message("hello", "U123", "C001"), Acknowledger::none())
        .await;

    assert_eq!(outcome, Some(Dispatch::Handled("keyword_responder")));
    let posted = api.posted();
    assert_eq!(posted.len(), 1, "exactly one reply");
    assert_eq!(
        posted[0],
        OutboundMessage::plain("C001", "Hello, <@U123>! :smile:")
    );
}

#[tokio::test]
async fn greeting_mentions_sender_and_smiles() {
    let (api, state) = test_app_state();

    state
        .dispatch(message("hello", "U123", "C001"), Acknowledger::none())
        .await;

    let text = api.posted()[0].text.clone().expect("reply has text");
    assert!(text.contains("<@U123>"));
    assert!(text.contains(":smile:"));
}

#[tokio::test]
async fn non_keyword_messages_are_dropped() {
    let (api, state) = test_app_state();

    for text in ["hi", "Hello", "hello ", "say hello", ""] {
        let outcome = state
            .dispatch(message(text, "U123", "C001"), Acknowledger::none())
            .await;
        assert_eq!(outcome, Some(Dispatch::Dropped), "text {text:?} must not match");
    }
    assert!(api.calls().is_empty(), "dropped messages make no API calls");
}

#[tokio::test]
async fn each_keyword_message_gets_its_own_reply() {
    let (api, state) = test_app_state();

    state
        .dispatch(message("hello", "U1", "C001"), Acknowledger::none())
        .await;
    state
        .dispatch(message("hello", "U2", "C002"), Acknowledger::none())
        .await;

    let posted = api.posted();
    assert_eq!(posted.len(), 2);
    assert_eq!(posted[0].channel, "C001");
    assert_eq!(posted[1].channel, "C002");
    assert!(posted[1].text.as_deref().unwrap().contains("<@U2>"));
}

#[tokio::test]
async fn failed_reply_is_reported_not_retried() {
    let (api, state) = test_app_state_with(RecordingSlackApi::new().failing_posts());

    let outcome = state
        .dispatch(message("hello", "U123", "C001"), Acknowledger::none())
        .await;

    assert_eq!(outcome, None, "handler failure surfaces as None");
    assert_eq!(api.calls().len(), 1, "no retry after a failed post");
}
