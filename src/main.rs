#![forbid(unsafe_code)]

//! `slack-poll-bot`: Socket Mode bot binary.
//!
//! Loads configuration and credentials, validates the bot token, connects
//! Socket Mode, and serves events until the connection ends or the process
//! receives Ctrl-C / SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use slack_poll_bot::config::GlobalConfig;
use slack_poll_bot::slack::client::SlackService;
use slack_poll_bot::slack::handlers::default_dispatcher;
use slack_poll_bot::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "slack-poll-bot", about = "Slack keyword and poll bot", version, long_about = None)]
struct Cli {
    /// Optional TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    // A missing .env file is normal; the environment may already hold the tokens.
    let dotenv = dotenvy::dotenv();
    init_tracing(args.log_format)?;
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }
    info!("slack-poll-bot bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = match args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    config.load_credentials().await?;
    info!(
        keyword = %config.bot.keyword,
        shortcut = %config.bot.shortcut_callback_id,
        modal = %config.bot.modal_callback_id,
        "configuration loaded"
    );

    // ── Connect to Slack ────────────────────────────────
    let service = Arc::new(SlackService::new(&config.slack)?);
    service.verify_bot_token().await.map_err(|err| {
        error!(%err, "bot token validation failed");
        err
    })?;

    let runtime = service
        .connect(default_dispatcher(&config.bot))
        .await
        .map_err(|err| {
            error!(%err, "socket mode connection failed");
            err
        })?;
    info!("bot ready");

    runtime.serve_until(shutdown_signal()).await?;
    info!("slack-poll-bot shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
