//! BotConfig: BaseConfig + AnalyticsConfig + LLM settings. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{AnalyticsConfig, BaseConfig};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub analytics: AnalyticsConfig,
    pub llm: EnvLlmConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let analytics = AnalyticsConfig::from_env()?;
        let llm = EnvLlmConfig::from_env()?;
        Ok(Self {
            base,
            analytics,
            llm,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.analytics.validate()?;
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!("LLM base URL is not a valid URL: {}", self.llm.base_url());
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.analytics
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
