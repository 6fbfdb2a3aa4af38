//! Slack bridge layer modules.

pub mod api;
pub mod blocks;
pub mod client;
pub mod dispatcher;
pub mod events;
pub mod handlers;
