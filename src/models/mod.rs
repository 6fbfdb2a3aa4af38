//! Domain model module declarations.

pub mod event;
pub mod message;
pub mod modal;
pub mod poll;
