//! Unit tests for converting Socket Mode message and interaction payloads
//! into `InboundEvent`s.

use serde_json::json;
use slack_morphism::prelude::{SlackInteractionEvent, SlackMessageEvent};
use slack_poll_bot::models::event::{EventKind, InboundEvent, MessageEvent, ShortcutInvocation};
use slack_poll_bot::models::poll::{poll_modal, PollSubmission};
use slack_poll_bot::slack::events;

fn parse(json: serde_json::Value) -> SlackMessageEvent {
    serde_json::from_value(json).expect("message event parses")
}

#[test]
fn user_message_converts() {
    let event = parse(serde_json::json!({
        "ts": "1700000000.000100",
        "channel": "C123",
        "channel_type": "channel",
        "user": "U123",
        "text": "hello"
    }));

    let converted = events::message_event(&event).expect("user message converts");
    assert_eq!(
        converted,
        MessageEvent {
            text: "hello".into(),
            channel: "C123".into(),
            user: "U123".into(),
            ts: "1700000000.000100".into(),
        }
    );
}

#[test]
fn bot_message_subtype_is_skipped() {
    let event = parse(serde_json::json!({
        "ts": "1700000000.000200",
        "channel": "C123",
        "subtype": "bot_message",
        "bot_id": "B123",
        "text": "hello"
    }));

    assert!(events::message_event(&event).is_none());
}

#[test]
fn message_without_user_is_skipped() {
    let event = parse(serde_json::json!({
        "ts": "1700000000.000300",
        "channel": "C123",
        "text": "hello"
    }));

    assert!(events::message_event(&event).is_none());
}

#[test]
fn message_without_text_is_skipped() {
    let event = parse(serde_json::json!({
        "ts": "1700000000.000400",
        "channel": "C123",
        "user": "U123"
    }));

    assert!(events::message_event(&event).is_none());
}

#[test]
fn inbound_event_reports_kind_and_user() {
    let event = InboundEvent::Message(MessageEvent {
        text: "hello".into(),
        channel: "C1".into(),
        user: "U9".into(),
        ts: "1.0".into(),
    });

    assert_eq!(event.kind(), EventKind::Message);
    assert_eq!(event.kind().as_str(), "message");
    assert_eq!(event.user(), "U9");
    assert_eq!(EventKind::ViewSubmission.as_str(), "view_submission");
}

fn interaction(json: serde_json::Value) -> SlackInteractionEvent {
    serde_json::from_value(json).expect("interaction payload parses")
}

fn team() -> serde_json::Value {
    json!({ "id": "T1", "domain": "acme" })
}

fn user() -> serde_json::Value {
    json!({ "id": "U123", "username": "alice", "name": "alice", "team_id": "T1" })
}

/// Submitted view as Slack echoes it back: the opened modal plus view
/// metadata and the input state.
fn submitted_poll_view(values: serde_json::Value) -> serde_json::Value {
    let mut view = serde_json::to_value(poll_modal("poll_shortcut_modal", "My App"))
        .expect("serialise modal");
    let fields = view.as_object_mut().expect("modal is an object");
    for (key, value) in [
        ("id", json!("V123")),
        ("team_id", json!("T1")),
        ("private_metadata", json!("")),
        ("state", json!({ "values": values })),
        ("hash", json!("1700000000.abcdef")),
        ("clear_on_close", json!(false)),
        ("notify_on_close", json!(false)),
        ("previous_view_id", json!(null)),
        ("root_view_id", json!("V123")),
        ("app_id", json!("A1")),
        ("external_id", json!("")),
        ("bot_id", json!("B1")),
    ] {
        fields.insert(key.to_owned(), value);
    }
    view
}

fn poll_state_values() -> serde_json::Value {
    json!({
        "target_conversation": {
            "input": { "type": "conversations_select", "selected_conversation": "C456" }
        },
        "poll_question": {
            "input": { "type": "plain_text_input", "value": "Pizza or tacos?" }
        },
        "option_1": { "input": { "type": "plain_text_input", "value": "Pizza" } },
        "option_2": { "input": { "type": "plain_text_input", "value": "Tacos" } },
        "option_3": { "input": { "type": "plain_text_input", "value": "Either" } }
    })
}

fn view_submission_payload(view: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "view_submission",
        "team": team(),
        "user": user(),
        "api_app_id": "A1",
        "token": "verification-token",
        "trigger_id": "1700000000.1.abc",
        "view": view,
        "response_urls": [],
        "is_enterprise_install": false
    })
}

#[test]
fn shortcut_payload_converts() {
    let event = interaction(json!({
        "type": "shortcut",
        "token": "verification-token",
        "action_ts": "1700000000.000001",
        "team": team(),
        "user": user(),
        "is_enterprise_install": false,
        "callback_id": "create_poll",
        "trigger_id": "9.9"
    }));

    let converted = events::interaction_event(&event).expect("shortcut converts");
    assert_eq!(
        converted,
        InboundEvent::Shortcut(ShortcutInvocation {
            callback_id: "create_poll".into(),
            trigger_id: "9.9".into(),
            user: "U123".into(),
        })
    );
}

/// The submitted state maps onto the poll fields the handler publishes.
#[test]
fn view_submission_payload_extracts_poll() {
    let event = interaction(view_submission_payload(submitted_poll_view(
        poll_state_values(),
    )));

    let Some(InboundEvent::ViewSubmission(view)) = events::interaction_event(&event) else {
        panic!("view submission must convert");
    };
    assert_eq!(view.callback_id, "poll_shortcut_modal");
    assert_eq!(view.user, "U123");

    let poll = PollSubmission::from_view(&view).expect("complete form");
    assert_eq!(
        poll,
        PollSubmission {
            asker: "U123".into(),
            channel: "C456".into(),
            question: "Pizza or tacos?".into(),
            options: ["Pizza".into(), "Tacos".into(), "Either".into()],
        }
    );
}

#[test]
fn view_submission_without_state_has_no_values() {
    let mut view = submitted_poll_view(json!({}));
    view.as_object_mut()
        .expect("view is an object")
        .remove("state");
    let event = interaction(view_submission_payload(view));

    let Some(InboundEvent::ViewSubmission(view)) = events::interaction_event(&event) else {
        panic!("view submission must convert");
    };
    assert!(view.values.is_empty());
    assert!(PollSubmission::from_view(&view).is_err());
}

#[test]
fn home_tab_view_is_ignored() {
    let event = interaction(view_submission_payload(json!({
        "id": "V999",
        "team_id": "T1",
        "type": "home",
        "blocks": [],
        "callback_id": "home_tab",
        "state": { "values": {} },
        "hash": "1700000000.abcdef",
        "app_id": "A1",
        "bot_id": "B1"
    })));

    assert!(events::interaction_event(&event).is_none());
}

#[test]
fn block_actions_payload_is_ignored() {
    let event = interaction(json!({
        "type": "block_actions",
        "team": team(),
        "user": user(),
        "api_app_id": "A1",
        "token": "verification-token",
        "container": {
            "type": "message",
            "message_ts": "1700000000.000100",
            "channel_id": "C456",
            "is_ephemeral": false
        },
        "trigger_id": "9.9",
        "channel": { "id": "C456", "name": "general" },
        "response_url": "https://hooks.slack.com/actions/T1/1/abc",
        "actions": [{
            "type": "button",
            "action_id": "vote",
            "block_id": "poll_actions",
            "text": { "type": "plain_text", "text": "Vote", "emoji": true },
            "value": "one",
            "action_ts": "1700000001.000000"
        }]
    }));

    assert!(events::interaction_event(&event).is_none());
}
