use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use arb_core::{
    config::Config, messaging::port::MessagingPort, model::client::CompletionClient,
    relay::RelayBot, store::ConfigStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayBot>,
}

/// Long-poll Telegram until the process stops.
///
/// `store` is owned by the caller for the lifetime of the process; handlers
/// only ever see it through the relay.
pub async fn run_polling(
    cfg: Arc<Config>,
    store: Arc<ConfigStore>,
    completion: Arc<dyn CompletionClient>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("bot started: @{}", me.username()),
        Err(e) => anyhow::bail!("telegram getMe failed (check TELEGRAM_BOT_TOKEN): {e}"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let relay = Arc::new(RelayBot::new(&cfg, store, completion, messenger));

    let state = Arc::new(AppState { relay });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
