use crate::{
    domain::{ChatId, MessageRef, UserId},
    model::profiles::{ModelId, MODEL_PROFILES},
};

/// Inbound update, already stripped of transport details.
#[derive(Clone, Debug)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
    Callback(CallbackQuery),
}

#[derive(Clone, Debug)]
pub struct Command {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Lowercase, without the leading `/` or a `@botname` suffix.
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct CallbackQuery {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub callback_id: String,
    pub data: String,
    /// Message carrying the keyboard, when the transport still has it.
    pub message: Option<MessageRef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
}

/// Inline keyboard, one button per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

pub const MODEL_CALLBACK_PREFIX: &str = "model:";

/// Actions a model-menu button can carry besides a model id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Refresh,
    Compare,
    Cancel,
}

impl MenuAction {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuAction::Refresh => "refresh",
            MenuAction::Compare => "compare",
            MenuAction::Cancel => "cancel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "refresh" => Some(MenuAction::Refresh),
            "compare" => Some(MenuAction::Compare),
            "cancel" => Some(MenuAction::Cancel),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            MenuAction::Refresh => "🔄 Refresh list",
            MenuAction::Compare => "📊 Compare models",
            MenuAction::Cancel => "❌ Cancel",
        }
    }
}

impl InlineKeyboard {
    pub fn new(buttons: Vec<InlineButton>) -> Self {
        Self { buttons }
    }

    /// One button per model (current one ticked), then the menu actions.
    pub fn model_picker(current: ModelId) -> Self {
        let models = MODEL_PROFILES.iter().map(|p| InlineButton {
            label: if p.id == current {
                format!("✅ {}", p.display_label)
            } else {
                p.display_label.to_string()
            },
            callback_data: format!("{MODEL_CALLBACK_PREFIX}{}", p.id.as_str()),
        });

        let actions = [MenuAction::Refresh, MenuAction::Compare, MenuAction::Cancel]
            .into_iter()
            .map(|a| InlineButton {
                label: a.label().to_string(),
                callback_data: format!("{MODEL_CALLBACK_PREFIX}{}", a.as_str()),
            });

        Self::new(models.chain(actions).collect())
    }
}
