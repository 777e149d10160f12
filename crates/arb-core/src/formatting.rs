//! Pure text helpers for replies: fixed-width chunking and truncation.
//!
//! Lengths are counted in characters (Unicode scalar values), never bytes,
//! so a slice boundary can't land inside a multi-byte sequence.

use crate::model::types::CompletionError;

/// Split `text` into consecutive slices of at most `max_len` characters.
///
/// Not sentence-aware. Concatenating the result yields `text`; empty input
/// yields no chunks.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for ch in text.chars() {
        if cur_len == max_len {
            out.push(std::mem::take(&mut cur));
            cur_len = 0;
        }
        cur.push(ch);
        cur_len += 1;
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// First `max_len` characters of `s`.
pub fn truncate_chars(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Turn a successful completion into the ordered outbound messages.
///
/// The first message carries the model header; later ones are bare.
pub fn render_reply(model_label: &str, text: &str, max_len: usize) -> Vec<String> {
    let mut parts = chunk(text, max_len).into_iter();
    let first = parts.next().unwrap_or_default();

    let mut out = vec![format!("💬 {model_label} reply:\n\n{first}")];
    out.extend(parts);
    out
}

/// User-facing text for a failed completion.
pub fn format_failure(err: &CompletionError) -> String {
    match err {
        CompletionError::NotConfigured => setup_instructions(),
        CompletionError::Timeout(_) => "❌ Request timed out, please try again later.".to_string(),
        CompletionError::Api { status, body } => {
            format!("❌ API call failed ({status})\n{body}...")
        }
        CompletionError::Transport(msg) => format!("❌ Request error: {msg}"),
    }
}

pub fn setup_instructions() -> String {
    "❌ Please finish configuration first\n\n\
📝 Steps:\n\
1️⃣ /config <API_KEY> <ENDPOINT>\n\
2️⃣ /model (pick a model)\n\
3️⃣ Send a message to start chatting\n\n\
💡 Example:\n\
/config sk-abc123... https://your-resource.openai.azure.com"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(len: usize) -> String {
        // Mixed widths: ASCII, 2-byte and 3-byte characters.
        "aé中".chars().cycle().take(len).collect()
    }

    #[test]
    fn chunks_reassemble_exactly() {
        for len in [0usize, 4000, 4001, 12000] {
            let text = sample(len);
            let parts = chunk(&text, 4000);
            assert_eq!(parts.concat(), text, "len={len}");
            assert!(parts.iter().all(|p| p.chars().count() <= 4000));
            assert!(parts.iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn chunk_counts() {
        assert_eq!(chunk("", 4000).len(), 0);
        assert_eq!(chunk(&sample(4000), 4000).len(), 1);
        assert_eq!(chunk(&sample(4001), 4000).len(), 2);
        assert_eq!(chunk(&sample(12000), 4000).len(), 3);

        let parts = chunk(&sample(4001), 4000);
        assert_eq!(parts[1].chars().count(), 1);
    }

    #[test]
    fn truncation_is_char_based() {
        assert_eq!(truncate_chars("中文字符", 2), "中文");
        assert_eq!(truncate_chars("short", 300), "short");
        assert_eq!(truncate_chars(&"x".repeat(500), 300).len(), 300);
    }

    #[test]
    fn reply_header_only_on_first_message() {
        let text = "y".repeat(9000);
        let msgs = render_reply("✨ GPT-4o", &text, 4000);
        assert_eq!(msgs.len(), 3);
        assert!(msgs[0].starts_with("💬 ✨ GPT-4o reply:\n\n"));
        assert!(!msgs[1].contains("reply:"));
        assert_eq!(msgs[2].len(), 1000);

        let body: String = msgs[0]
            .strip_prefix("💬 ✨ GPT-4o reply:\n\n")
            .map(|s| s.to_string())
            .unwrap();
        assert_eq!(format!("{body}{}{}", msgs[1], msgs[2]), text);
    }

    #[test]
    fn short_and_empty_replies_send_one_message() {
        assert_eq!(render_reply("m", "hi", 4000), vec!["💬 m reply:\n\nhi"]);
        assert_eq!(render_reply("m", "", 4000), vec!["💬 m reply:\n\n"]);
    }

    #[test]
    fn failure_texts() {
        let api = CompletionError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(format_failure(&api), "❌ API call failed (429)\nrate limited...");
        assert!(format_failure(&CompletionError::Timeout(Duration::from_secs(1))).contains("timed out"));
        assert!(format_failure(&CompletionError::NotConfigured).contains("/config"));
        assert!(format_failure(&CompletionError::Transport("dns".into())).ends_with("dns"));
    }
}
