//! Per-user provider configuration.
//!
//! The store is created once at process start, shared by every handler, and
//! dropped with the process. Nothing is persisted.

use std::{collections::HashMap, fmt};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    domain::UserId,
    errors::Error,
    model::profiles::{ModelId, DEFAULT_MODEL},
    Result,
};

pub const MIN_API_KEY_LEN: usize = 20;
pub const SECURE_SCHEME: &str = "https://";

/// API key plus the tenant endpoint it belongs to. Always set together.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    /// Base URL without trailing slash.
    pub endpoint_base: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("endpoint_base", &self.endpoint_base)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserConfig {
    pub user_id: UserId,
    pub credentials: Option<Credentials>,
    pub model: ModelId,
    pub updated_at: DateTime<Utc>,
}

impl UserConfig {
    pub fn is_complete(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Normalise and check a `/config` submission. Pure; no store access.
pub fn validate_credentials(api_key: &str, endpoint_base: &str) -> Result<Credentials> {
    let api_key = api_key.trim();
    let endpoint_base = endpoint_base.trim().trim_end_matches('/');

    if !endpoint_base.starts_with(SECURE_SCHEME) || endpoint_base.len() == SECURE_SCHEME.len() {
        return Err(Error::Validation(format!(
            "endpoint URL must start with {SECURE_SCHEME}"
        )));
    }
    if api_key.chars().count() < MIN_API_KEY_LEN {
        return Err(Error::Validation(
            "API key looks malformed, please check it".to_string(),
        ));
    }

    Ok(Credentials {
        api_key: api_key.to_string(),
        endpoint_base: endpoint_base.to_string(),
    })
}

#[derive(Default)]
pub struct ConfigStore {
    inner: RwLock<HashMap<UserId, UserConfig>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: UserId) -> Option<UserConfig> {
        self.inner.read().await.get(&user_id).cloned()
    }

    /// Store validated credentials, keeping any model chosen earlier.
    pub async fn set_credentials(
        &self,
        user_id: UserId,
        api_key: &str,
        endpoint_base: &str,
    ) -> Result<UserConfig> {
        let credentials = validate_credentials(api_key, endpoint_base)?;

        let mut map = self.inner.write().await;
        let model = map.get(&user_id).map(|c| c.model).unwrap_or(DEFAULT_MODEL);
        let record = UserConfig {
            user_id,
            credentials: Some(credentials),
            model,
            updated_at: Utc::now(),
        };
        map.insert(user_id, record.clone());
        Ok(record)
    }

    /// Select a model; creates a credential-less record if needed.
    pub async fn set_model(&self, user_id: UserId, model_id: &str) -> Result<UserConfig> {
        let model: ModelId = model_id.parse()?;

        let mut map = self.inner.write().await;
        let credentials = map.get(&user_id).and_then(|c| c.credentials.clone());
        let record = UserConfig {
            user_id,
            credentials,
            model,
            updated_at: Utc::now(),
        };
        map.insert(user_id, record.clone());
        Ok(record)
    }

    pub async fn is_complete(&self, user_id: UserId) -> bool {
        self.inner
            .read()
            .await
            .get(&user_id)
            .is_some_and(UserConfig::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123";
    const ENDPOINT: &str = "https://tenant.openai.azure.com";

    #[test]
    fn validation_rules() {
        let c = validate_credentials(KEY, "https://tenant.openai.azure.com///").unwrap();
        assert_eq!(c.endpoint_base, ENDPOINT);
        assert_eq!(c.api_key, KEY);

        assert!(matches!(
            validate_credentials(KEY, "http://tenant.openai.azure.com"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_credentials(KEY, "https://"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("short", ENDPOINT),
            Err(Error::Validation(_))
        ));
        // Exactly the minimum is accepted.
        assert!(validate_credentials(&"k".repeat(MIN_API_KEY_LEN), ENDPOINT).is_ok());
    }

    #[test]
    fn debug_output_hides_key() {
        let c = validate_credentials(KEY, ENDPOINT).unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains(KEY));
        assert!(dbg.contains(ENDPOINT));
    }

    #[tokio::test]
    async fn set_credentials_then_get_round_trips() {
        let store = ConfigStore::new();
        let user = UserId(7);
        assert!(store.get(user).await.is_none());
        assert!(!store.is_complete(user).await);

        let saved = store.set_credentials(user, KEY, ENDPOINT).await.unwrap();
        let got = store.get(user).await.unwrap();
        assert_eq!(saved, got);

        let creds = got.credentials.unwrap();
        assert_eq!(creds.api_key, KEY);
        assert_eq!(creds.endpoint_base, ENDPOINT);
        assert_eq!(got.model, DEFAULT_MODEL);
        assert!(store.is_complete(user).await);
    }

    #[tokio::test]
    async fn invalid_credentials_do_not_mutate() {
        let store = ConfigStore::new();
        let user = UserId(1);
        store.set_model(user, "grok-3").await.unwrap();
        let before = store.get(user).await;

        assert!(store
            .set_credentials(user, KEY, "ftp://nope")
            .await
            .is_err());
        assert_eq!(store.get(user).await, before);
    }

    #[tokio::test]
    async fn model_chosen_first_survives_configuration() {
        let store = ConfigStore::new();
        let user = UserId(2);

        let rec = store.set_model(user, "gpt-4.1").await.unwrap();
        assert!(rec.credentials.is_none());
        assert!(!store.is_complete(user).await);

        let rec = store.set_credentials(user, KEY, ENDPOINT).await.unwrap();
        assert_eq!(rec.model, ModelId::Gpt41);
        assert!(store.is_complete(user).await);
    }

    #[tokio::test]
    async fn switching_model_keeps_credentials() {
        let store = ConfigStore::new();
        let user = UserId(3);
        store.set_credentials(user, KEY, ENDPOINT).await.unwrap();

        let rec = store.set_model(user, "grok-3").await.unwrap();
        assert_eq!(rec.model, ModelId::Grok3);
        assert_eq!(rec.credentials.unwrap().api_key, KEY);
    }

    #[tokio::test]
    async fn unknown_model_is_rejected_without_mutation() {
        let store = ConfigStore::new();
        let user = UserId(4);

        assert!(matches!(
            store.set_model(user, "claude-9").await,
            Err(Error::UnknownModel(_))
        ));
        assert!(store.get(user).await.is_none());

        store.set_credentials(user, KEY, ENDPOINT).await.unwrap();
        let before = store.get(user).await;
        for bad in ["", "gpt4", "gpt-4o-mini", "refresh"] {
            assert!(matches!(
                store.set_model(user, bad).await,
                Err(Error::UnknownModel(_))
            ));
        }
        assert_eq!(store.get(user).await, before);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = ConfigStore::new();
        store.set_credentials(UserId(10), KEY, ENDPOINT).await.unwrap();
        assert!(store.is_complete(UserId(10)).await);
        assert!(!store.is_complete(UserId(11)).await);
    }
}
