//! OpenAI-compatible [`LlmClient`]: wraps openai-client, prepends an optional system
//! message and bounds every call with a timeout.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::{instrument, warn};

use super::{chat_message_to_openai, LlmClient, LlmConfig};

/// Default upper bound on one generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
    timeout: Duration,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: "gemini-2.5-flash".to_string(),
            system_prompt: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            ..Self::new(String::new())
        }
    }

    /// Builds a client from any [`LlmConfig`] (base URL, model, system prompt, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
            .with_timeout(Duration::from_secs(config.timeout_secs()))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system_prompt {
            openai_messages.push(chat_message_to_openai(&ChatMessage::system(system.as_str()))?);
        }
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }

        match tokio::time::timeout(
            self.timeout,
            self.client.chat_completion(&self.model, openai_messages),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "LLM request timed out");
                Err(anyhow!(
                    "LLM request timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            }
        }
    }
}
