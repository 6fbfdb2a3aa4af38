//! Slack Socket Mode client and Web API implementation of [`SlackApi`].

use std::future::Future;
use std::sync::Arc;

use slack_morphism::prelude::{
    HttpStatusCode, SlackApiChatPostMessageRequest, SlackApiReactionsAddRequest, SlackApiToken,
    SlackApiTokenType, SlackApiTokenValue, SlackApiViewsOpenRequest, SlackChannelId, SlackClient,
    SlackClientEventsListenerEnvironment, SlackClientHyperHttpsConnector, SlackClientSession,
    SlackClientSocketModeConfig, SlackClientSocketModeListener, SlackReactionName,
    SlackSocketModeListenerCallbacks, SlackTriggerId, SlackTs,
};
use tracing::{error, info};

use crate::config::SlackConfig;
use crate::models::message::{OutboundMessage, PostedMessage};
use crate::models::modal::ModalDefinition;
use crate::slack::api::{ApiFuture, SlackApi};
use crate::slack::dispatcher::EventDispatcher;
use crate::slack::{blocks, events};
use crate::state::AppState;
use crate::{AppError, Result};

type HyperClient = SlackClient<SlackClientHyperHttpsConnector>;

/// Slack client holding the bot and app-level tokens.
pub struct SlackService {
    client: Arc<HyperClient>,
    bot_token: SlackApiToken,
    app_token: SlackApiToken,
}

/// A connected Socket Mode listener.
pub struct SlackRuntime {
    listener: SlackClientSocketModeListener<SlackClientHyperHttpsConnector>,
}

impl SlackService {
    /// Build the HTTPS client and wrap both tokens.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Slack` if the HTTPS connector cannot be created.
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let connector = SlackClientHyperHttpsConnector::new()
            .map_err(|err| AppError::Slack(format!("failed to init slack connector: {err}")))?;
        let client = Arc::new(SlackClient::new(connector));
        let bot_token = SlackApiToken {
            token_value: SlackApiTokenValue(config.bot_token.clone()),
            cookie: None,
            team_id: None,
            scope: None,
            token_type: Some(SlackApiTokenType::Bot),
        };
        let app_token = SlackApiToken {
            token_value: SlackApiTokenValue(config.app_token.clone()),
            cookie: None,
            team_id: None,
            scope: None,
            token_type: Some(SlackApiTokenType::App),
        };

        Ok(Self {
            client,
            bot_token,
            app_token,
        })
    }

    /// Validate the bot token with `auth.test` and return the bot user id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if Slack rejects the token.
    pub async fn verify_bot_token(&self) -> Result<String> {
        let response = self
            .http_session()
            .auth_test()
            .await
            .map_err(|err| AppError::Config(format!("bot token rejected by auth.test: {err}")))?;
        let bot_user_id = response.user_id.0;
        info!(bot_user_id, "bot token validated");
        Ok(bot_user_id)
    }

    /// Create an HTTP session for direct API calls using the bot token.
    #[must_use]
    pub fn http_session(&self) -> SlackClientSession<'_, SlackClientHyperHttpsConnector> {
        self.client.open_session(&self.bot_token)
    }

    /// Open the Socket Mode connection and route its events to `dispatcher`.
    ///
    /// Reconnects after the initial connection are handled by the SDK with
    /// its default backoff and ping settings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `dispatcher` has no routes or Slack
    /// refuses the app-level token.
    pub async fn connect(self: &Arc<Self>, dispatcher: EventDispatcher) -> Result<SlackRuntime> {
        if dispatcher.is_empty() {
            return Err(AppError::Config("no event handlers registered".into()));
        }
        let handlers = dispatcher.len();
        let api: Arc<dyn SlackApi> = Arc::clone(self) as Arc<dyn SlackApi>;
        let state = Arc::new(AppState::new(dispatcher, api));

        let listener_env = Arc::new(
            SlackClientEventsListenerEnvironment::new(Arc::clone(&self.client))
                .with_error_handler(|err, _client, _state| {
                    error!(?err, "socket mode error");
                    HttpStatusCode::OK
                })
                .with_user_state(state),
        );
        let callbacks = SlackSocketModeListenerCallbacks::new()
            .with_hello_events(|event, _client, _state| async move {
                info!(?event, "socket hello");
            })
            .with_push_events(events::handle_push_event)
            .with_interaction_events(events::handle_interaction);
        let config = SlackClientSocketModeConfig {
            max_connections_count: SlackClientSocketModeConfig::DEFAULT_CONNECTIONS_COUNT,
            debug_connections: SlackClientSocketModeConfig::DEFAULT_DEBUG_CONNECTIONS,
            initial_backoff_in_seconds:
                SlackClientSocketModeConfig::DEFAULT_INITIAL_BACKOFF_IN_SECONDS,
            reconnect_timeout_in_seconds:
                SlackClientSocketModeConfig::DEFAULT_RECONNECT_TIMEOUT_IN_SECONDS,
            ping_interval_in_seconds: SlackClientSocketModeConfig::DEFAULT_PING_INTERVAL_IN_SECONDS,
            ping_failure_threshold_times:
                SlackClientSocketModeConfig::DEFAULT_PING_FAILURE_THRESHOLD_TIMES,
        };

        let listener = SlackClientSocketModeListener::new(&config, listener_env, callbacks);
        listener
            .listen_for(&self.app_token)
            .await
            .map_err(|err| AppError::Config(format!("socket mode connection refused: {err}")))?;
        info!(handlers, "socket mode connected");

        Ok(SlackRuntime { listener })
    }
}

impl SlackRuntime {
    /// Serve events until the connection ends or `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` if the listener exits with a non-zero
    /// code.
    pub async fn serve_until(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::select! {
            exit_code = self.listener.serve() => {
                info!(exit_code, "socket mode listener exited");
                if exit_code != 0 {
                    return Err(AppError::Transport(format!(
                        "socket mode listener exited with code {exit_code}"
                    )));
                }
            }
            () = shutdown => {
                info!("shutting down socket mode listener");
                self.listener.shutdown().await;
            }
        }
        Ok(())
    }
}

impl SlackApi for SlackService {
    fn post_message(&self, message: OutboundMessage) -> ApiFuture<'_, PostedMessage> {
        Box::pin(async move {
            let request = SlackApiChatPostMessageRequest {
                channel: SlackChannelId::new(message.channel.clone()),
                content: blocks::message_content(&message),
                as_user: None,
                icon_emoji: None,
                icon_url: None,
                link_names: Some(true),
                parse: None,
                thread_ts: None,
                username: None,
                reply_broadcast: None,
                unfurl_links: None,
                unfurl_media: None,
            };
            let response = self
                .http_session()
                .chat_post_message(&request)
                .await
                .map_err(|err| AppError::Slack(format!("failed to post message: {err}")))?;
            Ok(PostedMessage {
                channel: response.channel.0,
                ts: response.ts.0,
            })
        })
    }

    fn open_modal(&self, trigger_id: String, modal: ModalDefinition) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let view = blocks::modal_view(&modal)?;
            let request = SlackApiViewsOpenRequest::new(SlackTriggerId::new(trigger_id), view);
            self.http_session()
                .views_open(&request)
                .await
                .map_err(|err| AppError::Slack(format!("failed to open modal: {err}")))?;
            Ok(())
        })
    }

    fn add_reaction(&self, message: PostedMessage, name: String) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let request = SlackApiReactionsAddRequest::new(
                SlackChannelId::new(message.channel),
                SlackReactionName::new(name.clone()),
                SlackTs::new(message.ts),
            );
            self.http_session()
                .reactions_add(&request)
                .await
                .map_err(|err| AppError::Slack(format!("failed to add reaction {name}: {err}")))?;
            Ok(())
        })
    }
}
