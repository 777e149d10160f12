//! Relay service: turns inbound commands/messages into store updates and
//! completion calls, and sends the replies back through the messenger.

use std::{sync::Arc, time::Instant};

use crate::{
    config::Config,
    domain::{ChatId, MessageRef, UserId},
    formatting::{format_failure, render_reply, setup_instructions},
    messaging::{
        port::MessagingPort,
        types::{
            CallbackQuery, ChatAction, Command, IncomingUpdate, InlineKeyboard, MenuAction,
            TextMessage, MODEL_CALLBACK_PREFIX,
        },
    },
    model::{client::CompletionClient, profiles::DEFAULT_MODEL, types::build_turns},
    store::{ConfigStore, UserConfig},
    Result,
};

pub mod texts;

pub struct RelayBot {
    store: Arc<ConfigStore>,
    completion: Arc<dyn CompletionClient>,
    messenger: Arc<dyn MessagingPort>,
    reply_limit: usize,
}

impl RelayBot {
    pub fn new(
        cfg: &Config,
        store: Arc<ConfigStore>,
        completion: Arc<dyn CompletionClient>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            store,
            completion,
            messenger,
            reply_limit: cfg.telegram_safe_limit,
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub async fn handle(&self, update: IncomingUpdate) -> Result<()> {
        match update {
            IncomingUpdate::Command(cmd) => self.handle_command(cmd).await,
            IncomingUpdate::Text(msg) => self.handle_text(msg).await,
            IncomingUpdate::Callback(q) => self.handle_callback(q).await,
        }
    }

    async fn handle_command(&self, cmd: Command) -> Result<()> {
        let chat = cmd.chat_id;
        let user = cmd.user_id;

        match cmd.name.as_str() {
            "start" => self.send(chat, &texts::welcome()).await,
            "help" => self.send(chat, &texts::help()).await,

            "config" => {
                let [api_key, endpoint, ..] = cmd.args.as_slice() else {
                    return self.send(chat, &texts::config_usage()).await;
                };
                match self.store.set_credentials(user, api_key, endpoint).await {
                    Ok(rec) => {
                        tracing::info!(user = user.0, model = %rec.model, "credentials configured");
                        self.send(chat, &texts::config_saved(&rec)).await
                    }
                    Err(e) => self.send(chat, &format!("❌ {e}")).await,
                }
            }

            "model" => {
                if let Some(model_id) = cmd.args.first() {
                    return self.select_model_by_command(chat, user, model_id).await;
                }
                let current = self.store.get(user).await;
                let configured = current.as_ref().is_some_and(UserConfig::is_complete);
                let model = current.map(|c| c.model).unwrap_or(DEFAULT_MODEL);
                self.messenger
                    .send_inline_keyboard(
                        chat,
                        &texts::model_menu(model, configured),
                        InlineKeyboard::model_picker(model),
                    )
                    .await?;
                Ok(())
            }

            "status" => {
                let current = self.store.get(user).await;
                self.send(chat, &texts::status(current.as_ref())).await
            }

            "clear" => self.send(chat, texts::HISTORY_CLEARED).await,

            other => self.send(chat, &texts::unknown_command(other)).await,
        }
    }

    async fn select_model_by_command(
        &self,
        chat: ChatId,
        user: UserId,
        model_id: &str,
    ) -> Result<()> {
        let old = self.store.get(user).await.map(|c| c.model);
        match self.store.set_model(user, model_id).await {
            Ok(rec) => {
                tracing::info!(user = user.0, model = %rec.model, "model selected");
                self.send(chat, &texts::model_switched(old, rec.model)).await
            }
            Err(e) => self.send(chat, &format!("❌ {e}")).await,
        }
    }

    async fn handle_text(&self, msg: TextMessage) -> Result<()> {
        let chat = msg.chat_id;
        if msg.text.trim().is_empty() {
            return Ok(());
        }

        let Some(config) = self
            .store
            .get(msg.user_id)
            .await
            .filter(UserConfig::is_complete)
        else {
            return self.send(chat, &setup_instructions()).await;
        };

        let label = config.model.profile().display_label;
        if let Err(e) = self.messenger.send_chat_action(chat, ChatAction::Typing).await {
            tracing::debug!("typing indicator failed: {e}");
        }
        let placeholder = match self.messenger.send_text(chat, &texts::thinking(label)).await {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!("failed to send thinking message: {e}");
                None
            }
        };

        let turns = build_turns(config.model, &msg.text);
        let started = Instant::now();
        let outcome = self.completion.complete(&config, &turns).await;

        if let Some(m) = placeholder {
            if let Err(e) = self.messenger.delete_message(m).await {
                tracing::debug!("failed to delete thinking message: {e}");
            }
        }

        let replies = match outcome {
            Ok(text) => {
                tracing::info!(
                    user = msg.user_id.0,
                    model = %config.model,
                    chars = text.chars().count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "completion ok"
                );
                render_reply(label, &text, self.reply_limit)
            }
            Err(e) => {
                tracing::warn!(user = msg.user_id.0, model = %config.model, "completion failed: {e}");
                vec![format_failure(&e)]
            }
        };

        for reply in replies {
            self.send(chat, &reply).await?;
        }
        Ok(())
    }

    async fn handle_callback(&self, q: CallbackQuery) -> Result<()> {
        let Some(action) = q.data.strip_prefix(MODEL_CALLBACK_PREFIX) else {
            return self.messenger.answer_callback_query(&q.callback_id, None).await;
        };

        match MenuAction::parse(action) {
            Some(MenuAction::Cancel) => {
                self.messenger.answer_callback_query(&q.callback_id, None).await?;
                self.replace(&q, texts::MODEL_SELECTION_CANCELLED).await
            }
            Some(MenuAction::Compare) => {
                self.messenger.answer_callback_query(&q.callback_id, None).await?;
                self.replace(&q, &texts::model_comparison()).await
            }
            Some(MenuAction::Refresh) => {
                self.messenger.answer_callback_query(&q.callback_id, None).await?;
                let current = self.store.get(q.user_id).await;
                let configured = current.as_ref().is_some_and(UserConfig::is_complete);
                let model = current.map(|c| c.model).unwrap_or(DEFAULT_MODEL);
                let text = texts::model_menu(model, configured);
                let keyboard = InlineKeyboard::model_picker(model);
                match q.message {
                    Some(m) => self.messenger.edit_inline_keyboard(m, &text, keyboard).await,
                    None => self
                        .messenger
                        .send_inline_keyboard(q.chat_id, &text, keyboard)
                        .await
                        .map(|_| ()),
                }
            }
            None => {
                let old = self.store.get(q.user_id).await.map(|c| c.model);
                match self.store.set_model(q.user_id, action).await {
                    Ok(rec) => {
                        tracing::info!(user = q.user_id.0, model = %rec.model, "model selected");
                        self.messenger.answer_callback_query(&q.callback_id, None).await?;
                        self.replace(&q, &texts::model_switched(old, rec.model)).await
                    }
                    Err(e) => {
                        self.messenger
                            .answer_callback_query(&q.callback_id, Some(&e.to_string()))
                            .await
                    }
                }
            }
        }
    }

    /// Edit the menu message in place, or send a new one if it is gone.
    async fn replace(&self, q: &CallbackQuery, text: &str) -> Result<()> {
        match q.message {
            Some(m) => self.messenger.edit_text(m, text).await,
            None => self.send(q.chat_id, text).await,
        }
    }

    async fn send(&self, chat: ChatId, text: &str) -> Result<()> {
        self.messenger.send_text(chat, text).await.map(|_: MessageRef| ())
    }
}
