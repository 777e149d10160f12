use teloxide::types::Message;

use arb_core::{
    domain::{ChatId, UserId},
    messaging::types::{IncomingUpdate, TextMessage},
};

pub(super) fn to_update(msg: &Message, text: &str) -> Option<IncomingUpdate> {
    let user = msg.from()?;
    if text.trim().is_empty() {
        return None;
    }

    Some(IncomingUpdate::Text(TextMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        text: text.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(text: &str, with_sender: bool) -> Message {
        let mut v = json!({
            "message_id": 3,
            "date": 1_700_000_000,
            "chat": {"id": 555, "type": "private", "first_name": "Bo"},
            "text": text,
        });
        if with_sender {
            v["from"] = json!({"id": 555, "is_bot": false, "first_name": "Bo"});
        }
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn carries_chat_user_and_text() {
        let msg = message("hello there", true);
        let Some(IncomingUpdate::Text(t)) = to_update(&msg, "hello there") else {
            panic!("expected text update");
        };
        assert_eq!(t.chat_id, ChatId(555));
        assert_eq!(t.user_id, UserId(555));
        assert_eq!(t.text, "hello there");
    }

    #[test]
    fn blank_text_is_ignored() {
        let msg = message("  \n ", true);
        assert!(to_update(&msg, "  \n ").is_none());
    }

    #[test]
    fn anonymous_message_is_ignored() {
        let msg = message("hello", false);
        assert!(to_update(&msg, "hello").is_none());
    }
}
