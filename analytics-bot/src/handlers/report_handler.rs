//! `/report`: detailed analytics report over the last 24 hours of the group.

use async_trait::async_trait;
use chat_analytics::NO_MESSAGES_REPORT;
use storage::report_window;
use tracing::{error, info, instrument, warn};

use super::AnalyticsServices;
use crate::commands::{parse_command, Command};
use crate::core::{ChatTarget, Handler, HandlerError, HandlerResponse, Message, Result};
use crate::delivery::{Delivery, ReportHeader};

pub const REPORT_GROUP_ONLY: &str = "📊 This command only works in group chats!";
pub const REPORT_IN_PROGRESS: &str =
    "📊 Generating detailed report... This may take up to 30 seconds.";

/// Handles `/report` and stops the chain; everything else continues.
///
/// **External interactions:** Telegram (typing, status message, report segments), the
/// message store (24h window) and the LLM through [`chat_analytics::ReportGenerator`].
#[derive(Clone)]
pub struct ReportCommandHandler {
    services: AnalyticsServices,
}

impl ReportCommandHandler {
    pub fn new(services: AnalyticsServices) -> Self {
        Self { services }
    }

    async fn generate_and_send(&self, message: &Message) -> Result<()> {
        let s = &self.services;
        let chat_id = message.chat.id;

        if let Err(e) = s.bot.send_typing(chat_id).await {
            warn!(error = %e, "Failed to send typing indicator");
        }
        let status_id = s
            .bot
            .send_message_and_return_id(&ChatTarget::reply_to(message), REPORT_IN_PROGRESS)
            .await?;

        let messages = s.store.query_window(chat_id, report_window()).await?;
        if messages.is_empty() {
            info!("No messages in the report window");
            s.bot
                .edit_message(chat_id, &status_id, NO_MESSAGES_REPORT)
                .await?;
            return Ok(());
        }

        info!(message_count = messages.len(), "Generating report");
        let report = s.report_generator.generate_daily_report(&messages).await;

        if let Err(e) = s.bot.delete_message(chat_id, &status_id).await {
            warn!(error = %e, "Failed to delete status message");
        }

        send_report(&s.delivery, chat_id, &report).await
    }
}

/// Delivers a generated report under the daily report header. Shared with the scheduler.
pub(crate) async fn send_report(delivery: &Delivery, chat_id: i64, report: &str) -> Result<()> {
    let outcome = delivery
        .deliver(
            &ChatTarget::chat(chat_id),
            report,
            Some(&ReportHeader::daily_report()),
        )
        .await;
    if outcome.delivered() == 0 {
        return Err(HandlerError::DeliveryFailed {
            failed: outcome.failed,
            segments: outcome.segments,
        }
        .into());
    }
    info!(chat_id = chat_id, segments = outcome.segments, "✅ Report sent");
    Ok(())
}

#[async_trait]
impl Handler for ReportCommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let parsed = match parse_command(&message.content) {
            Some(parsed) if parsed.command == Command::Report => parsed,
            _ => return Ok(HandlerResponse::Continue),
        };
        let bot_username = self.services.bot_username.read().await.clone();
        if !parsed.is_addressed_to(bot_username.as_deref()) {
            return Ok(HandlerResponse::Stop);
        }

        if !message.chat.is_group_context() {
            self.services.bot.reply_to(message, REPORT_GROUP_ONLY).await?;
            return Ok(HandlerResponse::Stop);
        }

        if let Err(e) = self.generate_and_send(message).await {
            error!(error = %e, "Error handling /report");
            let text = format!("❌ Failed to generate report: {}", e);
            if let Err(e) = self.services.bot.reply_to(message, &text).await {
                warn!(error = %e, "Failed to send report error reply");
            }
        }
        Ok(HandlerResponse::Stop)
    }
}
