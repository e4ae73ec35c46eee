//! Bot configuration: BaseConfig (Telegram + log + DB) + AnalyticsConfig (report / Q&A
//! tuning) + the LLM settings from `llm-client`.

mod analytics;
mod base;
mod bot_config;


pub use analytics::AnalyticsConfig;
pub use base::BaseConfig;
pub use bot_config::BotConfig;
