//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, MessageId, ParseMode, ReplyParameters};

use crate::core::{parse_message_id, Bot as CoreBot, ChatTarget, DbotError, Result, TextFormat};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    #[allow(deprecated)]
    async fn send(
        &self,
        target: &ChatTarget,
        text: &str,
        format: TextFormat,
    ) -> Result<teloxide::types::Message> {
        let mut request = self.bot.send_message(ChatId(target.chat_id), text.to_string());
        if format == TextFormat::Markdown {
            // Legacy Markdown; generated texts use `*bold*`.
            request = request.parse_mode(ParseMode::Markdown);
        }
        if let Some(id) = target.reply_to_message_id.as_deref() {
            request = request.reply_parameters(ReplyParameters::new(MessageId(parse_message_id(id)?)));
        }
        request.await.map_err(|e| DbotError::Bot(e.to_string()))
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, target: &ChatTarget, text: &str, format: TextFormat) -> Result<()> {
        self.send(target, text, format).await?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, target: &ChatTarget, text: &str) -> Result<String> {
        let sent = self.send(target, text, TextFormat::Plain).await?;
        Ok(sent.id.0.to_string())
    }

    async fn edit_message(&self, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(id), text)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat_id), MessageId(id))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
