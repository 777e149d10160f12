use std::time::Duration;

use serde::Serialize;

use super::profiles::ModelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message sent to the provider. Built per request, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The model's system prompt followed by the user's message.
pub fn build_turns(model: ModelId, user_text: &str) -> Vec<ConversationTurn> {
    vec![
        ConversationTurn::system(model.profile().system_prompt),
        ConversationTurn::user(user_text),
    ]
}

/// Categorised failure of one completion call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("credentials or model not configured")]
    NotConfigured,

    /// Non-200 reply; `body` is already truncated for display.
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type CompletionResult = std::result::Result<String, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_serialize_with_lowercase_roles() {
        let turns = build_turns(ModelId::Gpt4o, "hi");
        let v = serde_json::to_value(&turns).unwrap();
        assert_eq!(v[0]["role"], "system");
        assert_eq!(v[0]["content"], ModelId::Gpt4o.profile().system_prompt);
        assert_eq!(v[1], serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn timeout_message_mentions_bound() {
        let e = CompletionError::Timeout(Duration::from_secs(120));
        assert_eq!(e.to_string(), "request timed out after 120s");
    }
}
