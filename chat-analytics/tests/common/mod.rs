//! Shared test doubles: a scripted [`LlmClient`] and stored-message builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use llm_client::LlmClient;
use prompt::ChatMessage;
use storage::StoredMessage;

/// Records every prompt and answers with `reply #<call number>`. Prompts containing one of
/// `fail_containing` (or all prompts when `fail_all`) return an error instead.
pub struct MockLlm {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    reply: String,
    fail_all: bool,
    fail_containing: Vec<String>,
}

impl MockLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply: reply.to_string(),
            fail_all: false,
            fail_containing: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::replying("")
        }
    }

    /// Fails any prompt containing `needle`.
    pub fn failing_when_contains(mut self, needle: &str) -> Self {
        self.fail_containing.push(needle.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt.clone());

        if self.fail_all {
            return Err(anyhow!("provider unavailable"));
        }
        if self.fail_containing.iter().any(|needle| prompt.contains(needle.as_str())) {
            return Err(anyhow!("provider rejected request"));
        }
        Ok(format!("{} #{}", self.reply, n + 1))
    }
}

/// A message `minutes` after 2024-05-01 09:00 UTC.
pub fn message(id: i64, author: &str, text: &str, minutes: i64) -> StoredMessage {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    StoredMessage {
        id,
        chat_id: -100,
        user_id: id.to_string(),
        user_name: author.to_string(),
        content: text.to_string(),
        created_at: base + Duration::minutes(minutes),
    }
}

/// `count` messages of roughly `body_len` characters each, one minute apart.
pub fn messages(count: usize, body_len: usize) -> Vec<StoredMessage> {
    (0..count)
        .map(|i| {
            let body = format!("m{:05} {}", i, "x".repeat(body_len.saturating_sub(7)));
            message(i as i64 + 1, "@alice", &body, i as i64)
        })
        .collect()
}
