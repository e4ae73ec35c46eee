//! `/bot <question>`: answers a question from the last 14 days of group history.

use async_trait::async_trait;
use storage::qa_window;
use tracing::{error, info, instrument, warn};

use super::AnalyticsServices;
use crate::commands::{parse_command, Command};
use crate::core::{ChatTarget, Handler, HandlerError, HandlerResponse, Message, Result};

pub const ASK_GROUP_ONLY: &str = "🤖 This command only works in group chats!";
pub const ASK_USAGE: &str = "Please provide a question after /bot\nExample: /bot What were the main topics discussed this week?";
pub const NO_HISTORY_REPLY: &str =
    "I don't have any message history yet. Start chatting and ask me again later!";

/// Handles `/bot` and stops the chain; everything else continues.
#[derive(Clone)]
pub struct AskCommandHandler {
    services: AnalyticsServices,
}

impl AskCommandHandler {
    pub fn new(services: AnalyticsServices) -> Self {
        Self { services }
    }

    async fn answer(&self, message: &Message, question: &str) -> Result<()> {
        let s = &self.services;
        let chat_id = message.chat.id;

        if let Err(e) = s.bot.send_typing(chat_id).await {
            warn!(error = %e, "Failed to send typing indicator");
        }

        let messages = s.store.query_window(chat_id, qa_window()).await?;
        if messages.is_empty() {
            s.bot.reply_to(message, NO_HISTORY_REPLY).await?;
            return Ok(());
        }

        info!(message_count = messages.len(), "Answering question");
        let answer = s.answerer.answer_question(question, &messages).await;

        let outcome = s
            .delivery
            .deliver(&ChatTarget::reply_to(message), &answer, None)
            .await;
        if outcome.delivered() == 0 {
            return Err(HandlerError::DeliveryFailed {
                failed: outcome.failed,
                segments: outcome.segments,
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for AskCommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(parsed) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };
        let question = match &parsed.command {
            Command::Ask { question } => question.clone(),
            _ => return Ok(HandlerResponse::Continue),
        };
        let bot_username = self.services.bot_username.read().await.clone();
        if !parsed.is_addressed_to(bot_username.as_deref()) {
            return Ok(HandlerResponse::Stop);
        }

        if !message.chat.is_group_context() {
            self.services.bot.reply_to(message, ASK_GROUP_ONLY).await?;
            return Ok(HandlerResponse::Stop);
        }

        let Some(question) = question else {
            self.services.bot.reply_to(message, ASK_USAGE).await?;
            return Ok(HandlerResponse::Stop);
        };

        if let Err(e) = self.answer(message, &question).await {
            error!(error = %e, "Error handling /bot");
            let text = format!(
                "❌ Sorry, I encountered an error while processing your question:\n{}",
                e
            );
            if let Err(e) = self.services.bot.reply_to(message, &text).await {
                warn!(error = %e, "Failed to send error reply");
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
