use teloxide::types::CallbackQuery as TgCallbackQuery;

use arb_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    messaging::types::{CallbackQuery, IncomingUpdate},
};

pub(super) fn to_update(q: &TgCallbackQuery) -> Option<IncomingUpdate> {
    let data = q.data.clone().filter(|d| !d.is_empty())?;
    let user_id = q.from.id.0 as i64;

    let message = q.message.as_ref().map(|m| MessageRef {
        chat_id: ChatId(m.chat.id.0),
        message_id: MessageId(m.id.0),
    });
    // Without the menu message, reply in the user's private chat.
    let chat_id = message.map(|m| m.chat_id).unwrap_or(ChatId(user_id));

    Some(IncomingUpdate::Callback(CallbackQuery {
        chat_id,
        user_id: UserId(user_id),
        callback_id: q.id.clone(),
        data,
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(data: Option<&str>, with_message: bool) -> TgCallbackQuery {
        let mut v = json!({
            "id": "cb-7",
            "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
            "chat_instance": "-1",
        });
        if let Some(d) = data {
            v["data"] = json!(d);
        }
        if with_message {
            v["message"] = json!({
                "message_id": 9,
                "date": 1_700_000_000,
                "chat": {"id": 777, "type": "private", "first_name": "Ann"},
                "text": "menu",
            });
        }
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn keeps_menu_message_reference() {
        let Some(IncomingUpdate::Callback(cb)) = to_update(&query(Some("model:gpt-4"), true))
        else {
            panic!("expected callback update");
        };
        assert_eq!(cb.chat_id, ChatId(777));
        assert_eq!(cb.user_id, UserId(42));
        assert_eq!(cb.callback_id, "cb-7");
        assert_eq!(cb.data, "model:gpt-4");
        assert_eq!(
            cb.message,
            Some(MessageRef {
                chat_id: ChatId(777),
                message_id: MessageId(9),
            })
        );
    }

    #[test]
    fn falls_back_to_private_chat_without_message() {
        let Some(IncomingUpdate::Callback(cb)) = to_update(&query(Some("model:refresh"), false))
        else {
            panic!("expected callback update");
        };
        assert_eq!(cb.chat_id, ChatId(42));
        assert_eq!(cb.message, None);
    }

    #[test]
    fn empty_or_missing_data_is_ignored() {
        assert!(to_update(&query(Some(""), true)).is_none());
        assert!(to_update(&query(None, true)).is_none());
    }
}
