use std::{env, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_SAFE_LIMIT: usize = 4000;

/// Typed process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// Total bound on one outbound completion call.
    pub request_timeout: Duration,

    /// Longest reply chunk sent as a single Telegram message.
    pub telegram_safe_limit: usize,
}

impl Config {
    /// Load from the process environment, after an optional `.env` file.
    ///
    /// Existing variables are never overridden by `.env`.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("ignoring unreadable .env file: {e}"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if telegram_bot_token.is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let request_timeout = parse_u64(&lookup, "REQUEST_TIMEOUT_SECS")?
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let telegram_safe_limit = parse_u64(&lookup, "TELEGRAM_SAFE_LIMIT")?
            .map(|n| n as usize)
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SAFE_LIMIT);

        Ok(Self {
            telegram_bot_token,
            request_timeout,
            telegram_safe_limit,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}
