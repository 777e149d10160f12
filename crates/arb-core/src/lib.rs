//! Core domain + application logic for the Azure OpenAI relay bot.
//!
//! This crate is framework-agnostic. Telegram and the Azure OpenAI HTTP API
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod relay;
pub mod store;

pub use errors::{Error, Result};
