//! Messenger abstraction. Telegram implements it today.

pub mod port;
pub mod types;
