#![forbid(unsafe_code)]

//! Slack bot that greets a keyword and runs emoji-voted polls opened from a
//! shortcut modal, connected over Socket Mode.

pub mod config;
pub mod errors;
pub mod models;
pub mod slack;
pub mod state;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
