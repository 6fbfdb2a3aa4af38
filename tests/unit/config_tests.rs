use std::io::Write as _;

use slack_poll_bot::{config::GlobalConfig, AppError};

fn sample_toml() -> &'static str {
    r#"
[bot]
keyword = "hi"
shortcut_callback_id = "new_poll"
modal_callback_id = "new_poll_modal"
modal_title = "Team Poll"
"#
}

#[test]
fn parses_valid_config() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("config parses");

    assert_eq!(config.bot.keyword, "hi");
    assert_eq!(config.bot.shortcut_callback_id, "new_poll");
    assert_eq!(config.bot.modal_callback_id, "new_poll_modal");
    assert_eq!(config.bot.modal_title, "Team Poll");
}

#[test]
fn empty_file_uses_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("empty config parses");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.bot.keyword, "hello");
    assert_eq!(config.bot.shortcut_callback_id, "create_poll");
    assert_eq!(config.bot.modal_callback_id, "poll_shortcut_modal");
    assert_eq!(config.bot.modal_title, "My App");
}

#[test]
fn partial_bot_table_keeps_other_defaults() {
    let config = GlobalConfig::from_toml_str("[bot]\nkeyword = \"hey\"\n").expect("parses");

    assert_eq!(config.bot.keyword, "hey");
    assert_eq!(config.bot.modal_callback_id, "poll_shortcut_modal");
}

#[test]
fn tokens_are_never_read_from_toml() {
    let toml = "[slack]\napp_token = \"xapp-file\"\nbot_token = \"xoxb-file\"\n";
    let config = GlobalConfig::from_toml_str(toml).expect("parses");

    assert!(config.slack.app_token.is_empty());
    assert!(config.slack.bot_token.is_empty());
}

#[test]
fn rejects_empty_keyword() {
    let result = GlobalConfig::from_toml_str("[bot]\nkeyword = \"  \"\n");

    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("bot.keyword")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn rejects_empty_modal_callback_id() {
    let result = GlobalConfig::from_toml_str("[bot]\nmodal_callback_id = \"\"\n");
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn rejects_modal_title_longer_than_slack_allows() {
    let result = GlobalConfig::from_toml_str("[bot]\nmodal_title = \"A very long poll modal title\"\n");

    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("modal_title")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn rejects_invalid_field_type() {
    let result = GlobalConfig::from_toml_str("[bot]\nkeyword = 42\n");

    match result {
        Err(AppError::Config(msg)) => assert!(msg.starts_with("invalid config")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(sample_toml().as_bytes()).expect("write config");

    let config = GlobalConfig::load_from_path(file.path()).expect("config loads");
    assert_eq!(config.bot.keyword, "hi");
}

#[test]
fn missing_file_is_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let result = GlobalConfig::load_from_path(temp.path().join("absent.toml"));

    match result {
        Err(AppError::Io(msg)) => {
            assert!(msg.contains("failed to read config"));
            assert!(msg.contains("absent.toml"));
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
