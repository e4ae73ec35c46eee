//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

use super::openai_llm::DEFAULT_TIMEOUT_SECS;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.llm_api_key
    }
    fn base_url(&self) -> &str {
        &self.llm_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn timeout_secs(&self) -> u64 {
        self.llm_timeout_secs
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// The API key is required: `LLM_API_KEY`, else `GEMINI_API_KEY`, else `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let llm_api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("LLM_API_KEY (or GEMINI_API_KEY / OPENAI_API_KEY) not set")?;
        let llm_base_url = env::var("LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            llm_api_key,
            llm_base_url,
            llm_model,
            llm_timeout_secs,
            llm_system_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LLM_API_KEY",
        "GEMINI_API_KEY",
        "OPENAI_API_KEY",
        "LLM_BASE_URL",
        "OPENAI_BASE_URL",
        "LLM_MODEL",
        "LLM_TIMEOUT_SECS",
        "LLM_SYSTEM_PROMPT",
    ];

    fn clear_env() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var("GEMINI_API_KEY", "gemini-key");

        let config = EnvLlmConfig::from_env().unwrap();

        assert_eq!(config.api_key(), "gemini-key");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(config.system_prompt().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_key_precedence_and_overrides() {
        clear_env();
        env::set_var("LLM_API_KEY", "primary");
        env::set_var("OPENAI_API_KEY", "secondary");
        env::set_var("OPENAI_BASE_URL", "https://api.openai.com/v1");
        env::set_var("LLM_MODEL", "gpt-4o-mini");
        env::set_var("LLM_TIMEOUT_SECS", "45");
        env::set_var("LLM_SYSTEM_PROMPT", "Be brief.");

        let config = EnvLlmConfig::from_env().unwrap();

        assert_eq!(config.api_key(), "primary");
        assert_eq!(config.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.timeout_secs(), 45);
        assert_eq!(config.system_prompt(), Some("Be brief."));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key_is_error() {
        clear_env();
        assert!(EnvLlmConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout_falls_back() {
        clear_env();
        env::set_var("LLM_API_KEY", "k");
        env::set_var("LLM_TIMEOUT_SECS", "0");
        assert_eq!(
            EnvLlmConfig::from_env().unwrap().timeout_secs(),
            DEFAULT_TIMEOUT_SECS
        );
        clear_env();
    }
}
