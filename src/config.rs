//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keychain service under which Slack tokens may be stored.
pub const KEYRING_SERVICE: &str = "slack-poll-bot";

/// Slack rejects modal titles longer than this many characters.
const MAX_MODAL_TITLE_CHARS: usize = 24;

/// Nested Slack configuration for Socket Mode connectivity.
///
/// Tokens are loaded at runtime via OS keychain or environment variables,
/// never from the TOML config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SlackConfig {
    /// App-level token used for Socket Mode (populated at runtime).
    #[serde(skip)]
    pub app_token: String,
    /// Bot user token used for Web API calls (populated at runtime).
    #[serde(skip)]
    pub bot_token: String,
}

/// Triggers and labels for the keyword responder and the poll workflow.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct BotConfig {
    /// Exact message text the keyword responder answers.
    pub keyword: String,
    /// Callback id of the global shortcut that opens the poll modal.
    pub shortcut_callback_id: String,
    /// Callback id shared by the poll modal and its submission handler.
    pub modal_callback_id: String,
    /// Title shown at the top of the poll modal.
    pub modal_title: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            keyword: "hello".into(),
            shortcut_callback_id: "create_poll".into(),
            modal_callback_id: "poll_shortcut_modal".into(),
            modal_title: "My App".into(),
        }
    }
}

/// Global configuration parsed from an optional `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct GlobalConfig {
    /// Slack connectivity settings.
    pub slack: SlackConfig,
    /// Bot trigger settings.
    pub bot: BotConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or
    /// `AppError::Config` if it contains invalid TOML or fails validation.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AppError::Io(format!("failed to read config {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load Slack credentials from OS keychain with env-var fallback.
    ///
    /// Tries the `slack-poll-bot` keyring service first, then falls back to
    /// `SLACK_APP_TOKEN` / `SLACK_BOT_TOKEN` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// the required tokens.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.slack.app_token = load_credential("slack_app_token", "SLACK_APP_TOKEN").await?;
        self.slack.bot_token = load_credential("slack_bot_token", "SLACK_BOT_TOKEN").await?;

        if !self.slack.app_token.starts_with("xapp-") {
            warn!("app token does not start with xapp-; socket mode will likely reject it");
        }
        if !self.slack.bot_token.starts_with("xoxb-") {
            warn!("bot token does not start with xoxb-; web api calls will likely fail");
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("bot.keyword", &self.bot.keyword),
            ("bot.shortcut_callback_id", &self.bot.shortcut_callback_id),
            ("bot.modal_callback_id", &self.bot.modal_callback_id),
            ("bot.modal_title", &self.bot.modal_title),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{name} must not be empty")));
            }
        }

        if self.bot.modal_title.chars().count() > MAX_MODAL_TITLE_CHARS {
            return Err(AppError::Config(format!(
                "bot.modal_title must be at most {MAX_MODAL_TITLE_CHARS} characters"
            )));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(keyring::Error::NoEntry) => {}
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    match env::var(env_key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))),
    }
}
