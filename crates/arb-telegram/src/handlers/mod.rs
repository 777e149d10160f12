//! Telegram update handlers.
//!
//! Each handler only translates a teloxide update into a core
//! `IncomingUpdate` and hands it to the relay. Failures are logged and
//! swallowed so one bad update never stops the dispatcher.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use arb_core::messaging::types::IncomingUpdate;

use crate::router::AppState;

mod callback;
mod commands;
mod text;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    match callback::to_update(&q) {
        Some(update) => dispatch(&state, update).await,
        None => tracing::debug!("ignoring callback without data"),
    }
    Ok(())
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(body) = msg.text() else {
        // Photos, stickers, voice etc. are not relayed.
        return Ok(());
    };

    let update = if body.starts_with('/') {
        commands::to_update(&msg, body)
    } else {
        text::to_update(&msg, body)
    };

    if let Some(update) = update {
        dispatch(&state, update).await;
    }
    Ok(())
}

async fn dispatch(state: &AppState, update: IncomingUpdate) {
    let kind = match &update {
        IncomingUpdate::Command(c) => format!("command /{}", c.name),
        IncomingUpdate::Text(_) => "text".to_string(),
        IncomingUpdate::Callback(_) => "callback".to_string(),
    };

    if let Err(e) = state.relay.handle(update).await {
        tracing::error!("failed to handle {kind}: {e}");
    }
}
