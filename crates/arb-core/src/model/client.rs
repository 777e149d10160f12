use async_trait::async_trait;

use crate::store::UserConfig;

use super::types::{CompletionResult, ConversationTurn};

/// Completion backend used by the relay.
///
/// Implementations issue at most one outbound call per invocation and never
/// retry. An incomplete `config` must yield `CompletionError::NotConfigured`
/// without touching the network.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, config: &UserConfig, turns: &[ConversationTurn]) -> CompletionResult;
}
