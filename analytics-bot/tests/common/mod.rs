//! Shared test doubles: recording [`Bot`], in-memory [`MessageStore`], scripted [`LlmClient`].

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use analytics_bot::{
    AnalyticsServices, Bot, Chat, ChatKind, ChatTarget, DbotError, Delivery, Message, Result,
    TextFormat, User,
};
use async_trait::async_trait;
use chat_analytics::{QueryAnswerer, ReportGenerator};
use chrono::{DateTime, Duration, Utc};
use llm_client::LlmClient;
use prompt::ChatMessage;
use storage::{MessageStore, StorageError, StoredMessage};

pub const GROUP_ID: i64 = -100123;
pub const PRIVATE_ID: i64 = 7;
pub const STATUS_MESSAGE_ID: &str = "555";

// ---------- Bot ----------

/// One call made on [`MockBot`], successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        reply_to: Option<String>,
        text: String,
        format: TextFormat,
        ok: bool,
    },
    SendWithId {
        chat_id: i64,
        text: String,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Delete {
        chat_id: i64,
        message_id: String,
    },
    Typing {
        chat_id: i64,
    },
}

/// Records every call. Markdown sends whose text contains `reject_markdown_containing`
/// fail (the empty needle rejects all Markdown); `reject_all` fails every send.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    reject_markdown_containing: Option<String>,
    reject_all: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_markdown() -> Self {
        Self::rejecting_markdown_containing("")
    }

    pub fn rejecting_markdown_containing(needle: &str) -> Self {
        Self {
            reject_markdown_containing: Some(needle.to_string()),
            ..Self::default()
        }
    }

    pub fn rejecting_everything() -> Self {
        Self {
            reject_all: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts of successful `send_message` calls, in order.
    pub fn delivered(&self) -> Vec<(String, TextFormat)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send {
                    text, format, ok: true, ..
                } => Some((text, format)),
                _ => None,
            })
            .collect()
    }

    pub fn delivered_texts(&self) -> Vec<String> {
        self.delivered().into_iter().map(|(t, _)| t).collect()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, target: &ChatTarget, text: &str, format: TextFormat) -> Result<()> {
        let rejected = self.reject_all
            || (format == TextFormat::Markdown
                && self
                    .reject_markdown_containing
                    .as_deref()
                    .map_or(false, |needle| text.contains(needle)));
        self.record(BotCall::Send {
            chat_id: target.chat_id,
            reply_to: target.reply_to_message_id.clone(),
            text: text.to_string(),
            format,
            ok: !rejected,
        });
        if rejected {
            return Err(DbotError::Bot("Bad Request: can't parse entities".to_string()));
        }
        Ok(())
    }

    async fn send_message_and_return_id(&self, target: &ChatTarget, text: &str) -> Result<String> {
        self.record(BotCall::SendWithId {
            chat_id: target.chat_id,
            text: text.to_string(),
        });
        if self.reject_all {
            return Err(DbotError::Bot("network down".to_string()));
        }
        Ok(STATUS_MESSAGE_ID.to_string())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: &str) -> Result<()> {
        self.record(BotCall::Delete {
            chat_id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.record(BotCall::Typing { chat_id });
        Ok(())
    }
}

// ---------- Store ----------

/// In-memory store with call counters; `failing()` makes every call return an error.
#[derive(Default)]
pub struct MemoryStore {
    messages: Mutex<Vec<StoredMessage>>,
    pub inserts: AtomicUsize,
    pub queries: AtomicUsize,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Seeds a message `age` old without counting it as an insert.
    pub fn seed(&self, chat_id: i64, user_name: &str, text: &str, age: Duration) {
        let mut messages = self.messages.lock().unwrap();
        let id = messages.len() as i64 + 1;
        messages.push(StoredMessage {
            id,
            chat_id,
            user_id: id.to_string(),
            user_name: user_name.to_string(),
            content: text.to_string(),
            created_at: Utc::now() - age,
        });
    }

    pub fn all(&self) -> Vec<StoredMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> std::result::Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Database("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert(
        &self,
        chat_id: i64,
        user_id: &str,
        user_name: &str,
        text: &str,
    ) -> std::result::Result<StoredMessage, StorageError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut messages = self.messages.lock().unwrap();
        let stored = StoredMessage {
            id: messages.len() as i64 + 1,
            chat_id,
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            content: text.to_string(),
            created_at: Utc::now(),
        };
        messages.push(stored.clone());
        Ok(stored)
    }

    async fn query_range(
        &self,
        chat_id: i64,
        since: DateTime<Utc>,
    ) -> std::result::Result<Vec<StoredMessage>, StorageError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut found: Vec<StoredMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id && m.created_at >= since)
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.created_at, m.id));
        Ok(found)
    }

    async fn purge_older_than(&self, age: Duration) -> std::result::Result<u64, StorageError> {
        self.check()?;
        let cutoff = Utc::now() - age;
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.created_at >= cutoff);
        Ok((before - messages.len()) as u64)
    }

    async fn count_by_chat(&self, chat_id: i64) -> std::result::Result<i64, StorageError> {
        self.check()?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .count() as i64)
    }
}

// ---------- LLM ----------

/// Returns `reply` (or fails) and records prompts.
pub struct MockLlm {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    reply: Option<String>,
}

impl MockLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply: None,
        }
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
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages
            .into_iter()
            .map(|m| m.content)
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        self.reply
            .clone()
            .ok_or_else(|| anyhow::anyhow!("LLM request timed out after 120 seconds"))
    }
}

// ---------- Wiring ----------

pub struct Fixture {
    pub bot: Arc<MockBot>,
    pub store: Arc<MemoryStore>,
    pub llm: Arc<MockLlm>,
    pub services: AnalyticsServices,
}

pub fn fixture(bot: MockBot, store: MemoryStore, llm: MockLlm) -> Fixture {
    let bot = Arc::new(bot);
    let store = Arc::new(store);
    let llm = Arc::new(llm);
    let services = AnalyticsServices {
        bot: bot.clone(),
        store: store.clone(),
        report_generator: ReportGenerator::new(llm.clone()),
        answerer: QueryAnswerer::new(llm.clone()),
        delivery: Delivery::new(bot.clone()),
        bot_username: Arc::new(tokio::sync::RwLock::new(Some("AnalyticsBot".to_string()))),
    };
    Fixture {
        bot,
        store,
        llm,
        services,
    }
}

pub fn message(chat: Chat, text: &str) -> Message {
    Message {
        id: "42".to_string(),
        user: User {
            id: 7001,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat,
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

pub fn group_message(text: &str) -> Message {
    message(Chat::new(GROUP_ID, ChatKind::Supergroup), text)
}

pub fn private_message(text: &str) -> Message {
    message(Chat::new(PRIVATE_ID, ChatKind::Private), text)
}
