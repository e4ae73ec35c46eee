//! Report / Q&A tuning and the scheduled report target. Loaded from env.

use anyhow::{Context, Result};
use chat_analytics::{QA_CONTEXT_MAX_CHARS, QA_RECENT_LIMIT, REPORT_CONTEXT_MAX_CHARS};
use std::env;
use storage::RETENTION_DAYS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// REPORT_CHAT_ID: chat receiving the scheduled 23:59 report; unset disables it.
    pub report_chat_id: Option<i64>,
    pub report_context_max_chars: usize,
    pub qa_context_max_chars: usize,
    pub qa_recent_limit: usize,
    pub retention_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            report_chat_id: None,
            report_context_max_chars: REPORT_CONTEXT_MAX_CHARS,
            qa_context_max_chars: QA_CONTEXT_MAX_CHARS,
            qa_recent_limit: QA_RECENT_LIMIT,
            retention_days: RETENTION_DAYS,
        }
    }
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let report_chat_id = match env::var("REPORT_CHAT_ID") {
            Ok(s) if !s.trim().is_empty() => Some(
                s.trim()
                    .parse::<i64>()
                    .with_context(|| format!("REPORT_CHAT_ID is not a chat id: {}", s))?,
            ),
            _ => None,
        };
        Ok(Self {
            report_chat_id,
            report_context_max_chars: parsed_or(
                "REPORT_CONTEXT_MAX_CHARS",
                defaults.report_context_max_chars,
            ),
            qa_context_max_chars: parsed_or("QA_CONTEXT_MAX_CHARS", defaults.qa_context_max_chars),
            qa_recent_limit: parsed_or("QA_RECENT_LIMIT", defaults.qa_recent_limit),
            retention_days: parsed_or("RETENTION_DAYS", defaults.retention_days),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_context_max_chars == 0 {
            anyhow::bail!("REPORT_CONTEXT_MAX_CHARS must be positive");
        }
        if self.qa_context_max_chars == 0 {
            anyhow::bail!("QA_CONTEXT_MAX_CHARS must be positive");
        }
        if self.qa_recent_limit == 0 {
            anyhow::bail!("QA_RECENT_LIMIT must be positive");
        }
        if self.retention_days <= 0 {
            anyhow::bail!("RETENTION_DAYS must be positive");
        }
        Ok(())
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention_days)
    }
}
