//! Bot abstraction for sending, editing and deleting messages.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via
//! teloxide and tests substitute recording mocks.

use async_trait::async_trait;

use super::error::{DbotError, Result};
use super::types::Message;

/// Markup used when sending a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Sent as is, nothing is parsed.
    #[default]
    Plain,
    /// Telegram legacy Markdown (`*bold*`).
    Markdown,
}

/// Where an outbound text goes: a chat, optionally as a reply to one of its messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTarget {
    pub chat_id: i64,
    pub reply_to_message_id: Option<String>,
}

impl ChatTarget {
    pub fn chat(chat_id: i64) -> Self {
        Self {
            chat_id,
            reply_to_message_id: None,
        }
    }

    /// Same chat as `message`, replying to it.
    pub fn reply_to(message: &Message) -> Self {
        Self {
            chat_id: message.chat.id,
            reply_to_message_id: Some(message.id.clone()),
        }
    }
}

/// Abstraction over the chat transport. `message_id`s are transport-specific strings
/// (Telegram: numeric).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `text` to `target` with the given markup.
    async fn send_message(&self, target: &ChatTarget, text: &str, format: TextFormat)
        -> Result<()>;
    /// Sends a plain text and returns its id, for a later `edit_message` / `delete_message`.
    async fn send_message_and_return_id(&self, target: &ChatTarget, text: &str) -> Result<String>;
    /// Replaces the text of an already sent message.
    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()>;
    async fn delete_message(&self, chat_id: i64, message_id: &str) -> Result<()>;
    /// Shows the "typing…" indicator in the chat.
    async fn send_typing(&self, chat_id: i64) -> Result<()>;

    /// Plain-text reply to `message`.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&ChatTarget::reply_to(message), text, TextFormat::Plain)
            .await
    }
}

/// Parses a message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
