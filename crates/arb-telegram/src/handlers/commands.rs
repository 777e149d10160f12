use teloxide::types::Message;

use arb_core::{
    domain::{ChatId, UserId},
    messaging::types::{Command, IncomingUpdate},
};

fn parse_command(text: &str) -> (String, Vec<String>) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.split_whitespace();
    let first = parts.next().unwrap_or("");
    let args = parts.map(str::to_string).collect();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, args)
}

pub(super) fn to_update(msg: &Message, text: &str) -> Option<IncomingUpdate> {
    let user = msg.from()?;
    let (name, args) = parse_command(text);
    if name.is_empty() {
        return None;
    }

    Some(IncomingUpdate::Command(Command {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        name,
        args,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_args() {
        let (cmd, args) = parse_command("/config  sk-123   https://x.openai.azure.com ");
        assert_eq!(cmd, "config");
        assert_eq!(args, vec!["sk-123", "https://x.openai.azure.com"]);
    }

    #[test]
    fn strips_bot_suffix_and_lowercases() {
        let (cmd, args) = parse_command("/Model@MyRelayBot grok-3");
        assert_eq!(cmd, "model");
        assert_eq!(args, vec!["grok-3"]);
    }

    #[test]
    fn bare_slash_has_no_name() {
        let (cmd, args) = parse_command("/");
        assert!(cmd.is_empty());
        assert!(args.is_empty());
    }
}
