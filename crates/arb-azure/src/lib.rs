//! Azure OpenAI adapter (chat completions).
//!
//! One POST per call to
//! `{endpoint}/openai/deployments/{model}/chat/completions?api-version=..`,
//! bounded by a total timeout and never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde::{Deserialize, Serialize};

use arb_core::{
    errors::Error,
    formatting::truncate_chars,
    model::{
        client::CompletionClient,
        profiles::{ModelId, ModelProfile},
        types::{CompletionError, CompletionResult, ConversationTurn},
    },
    store::UserConfig,
    Result,
};

const PROVIDER_PATH: &str = "openai/deployments";
const COMPLETIONS_PATH: &str = "chat/completions";
const API_KEY_HEADER: &str = "api-key";

pub const TOP_P: f64 = 0.95;
/// Raw error body kept for diagnostics.
pub const ERROR_BODY_MAX_CHARS: usize = 300;

#[derive(Clone, Debug)]
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl AzureOpenAiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("arb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self { http, timeout })
    }

    async fn exchange(
        &self,
        url: &str,
        api_key: &str,
        body: &ChatCompletionRequest<'_>,
    ) -> CompletionResult {
        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let text = resp.text().await.map_err(|e| {
                tracing::warn!(status = status.as_u16(), "failed to read azure error body");
                self.transport_error(e)
            })?;
            let body = truncate_chars(&text, ERROR_BODY_MAX_CHARS);
            tracing::error!(status = status.as_u16(), "azure api error: {body}");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        parse_completion(&bytes)
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            tracing::warn!("azure request timed out after {:?}", self.timeout);
            return CompletionError::Timeout(self.timeout);
        }
        tracing::error!("azure request error: {e}");
        CompletionError::Transport(e.to_string())
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, config: &UserConfig, turns: &[ConversationTurn]) -> CompletionResult {
        let Some(creds) = config.credentials.as_ref() else {
            return Err(CompletionError::NotConfigured);
        };

        let url = completion_url(&creds.endpoint_base, config.model);
        let body = ChatCompletionRequest::new(config.model.profile(), turns);
        tracing::debug!(%url, turns = turns.len(), "posting chat completion");

        // The client timeout already bounds each phase; this bounds the whole exchange.
        match tokio::time::timeout(self.timeout, self.exchange(&url, &creds.api_key, &body)).await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("azure request timed out after {:?}", self.timeout);
                Err(CompletionError::Timeout(self.timeout))
            }
        }
    }
}

/// Chat-completions URL for a deployment; the api-version comes from the model table.
pub fn completion_url(endpoint_base: &str, model: ModelId) -> String {
    format!(
        "{}/{PROVIDER_PATH}/{}/{COMPLETIONS_PATH}?api-version={}",
        endpoint_base.trim_end_matches('/'),
        model.as_str(),
        model.profile().api_version
    )
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub messages: &'a [ConversationTurn],
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(profile: &ModelProfile, messages: &'a [ConversationTurn]) -> Self {
        Self {
            messages,
            max_tokens: profile.max_output_tokens,
            temperature: profile.temperature,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Extract the first choice's message content from a 200 body.
fn parse_completion(body: &[u8]) -> CompletionResult {
    let parsed: ChatCompletionResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::error!("azure returned unparseable body: {e}");
        CompletionError::Transport(format!("invalid response body: {e}"))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| {
            tracing::error!("azure response has no message content");
            CompletionError::Transport("invalid response body: no message content".to_string())
        })
}
