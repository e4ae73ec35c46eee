//! Outbound delivery of generated text: segmentation plus per-segment Markdown → plain fallback.

use std::sync::Arc;

use chat_analytics::{segment, TELEGRAM_MAX_MESSAGE_LEN};
use tracing::{error, info, instrument, warn};

use crate::core::{Bot, ChatTarget, TextFormat};

/// Sent instead of a blank text, so the chat never receives an empty message.
pub const EMPTY_TEXT_NOTICE: &str = "⚠️ The model returned an empty response.";

/// Title prefixed to the first segment of a report, in both markup variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub formatted: String,
    pub plain: String,
}

impl ReportHeader {
    pub fn daily_report() -> Self {
        Self {
            formatted: "📊 *Daily Analytics Report*".to_string(),
            plain: "📊 Daily Analytics Report".to_string(),
        }
    }

    /// Characters the header adds to the first segment, separator included.
    fn overhead(&self) -> usize {
        self.formatted
            .chars()
            .count()
            .max(self.plain.chars().count())
            + 2
    }
}

/// What happened to each segment of one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub segments: usize,
    /// Delivered with Markdown.
    pub formatted: usize,
    /// Markdown rejected, delivered as plain text.
    pub plain_fallbacks: usize,
    /// Not delivered at all.
    pub failed: usize,
}

impl DeliveryOutcome {
    pub fn delivered(&self) -> usize {
        self.formatted + self.plain_fallbacks
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Sends arbitrarily long text as ordered segments. Each segment is tried with Markdown and
/// resent as plain text if the transport rejects it; a failed segment never blocks the next.
#[derive(Clone)]
pub struct Delivery {
    bot: Arc<dyn Bot>,
    max_len: usize,
}

impl Delivery {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            max_len: TELEGRAM_MAX_MESSAGE_LEN,
        }
    }

    /// Per-message character limit; Telegram's 4096 by default.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.max(1);
        self
    }

    #[instrument(skip(self, text, header), fields(chat_id = target.chat_id, text_chars = text.chars().count()))]
    pub async fn deliver(
        &self,
        target: &ChatTarget,
        text: &str,
        header: Option<&ReportHeader>,
    ) -> DeliveryOutcome {
        let limit = match header {
            Some(h) => self.max_len.saturating_sub(h.overhead()).max(1),
            None => self.max_len,
        };
        let text = if text.trim().is_empty() {
            warn!("Blank text, sending notice instead");
            EMPTY_TEXT_NOTICE
        } else {
            text
        };
        let segments = segment(text, limit);
        let mut outcome = DeliveryOutcome {
            segments: segments.len(),
            ..DeliveryOutcome::default()
        };

        for (index, body) in segments.iter().enumerate() {
            let (formatted, plain) = match header.filter(|_| index == 0) {
                Some(h) => (
                    format!("{}\n\n{}", h.formatted, body),
                    format!("{}\n\n{}", h.plain, body),
                ),
                None => (body.clone(), body.clone()),
            };

            match self
                .bot
                .send_message(target, &formatted, TextFormat::Markdown)
                .await
            {
                Ok(()) => outcome.formatted += 1,
                Err(e) => {
                    warn!(segment = index, error = %e, "Markdown rejected, resending as plain text");
                    match self.bot.send_message(target, &plain, TextFormat::Plain).await {
                        Ok(()) => outcome.plain_fallbacks += 1,
                        Err(e) => {
                            error!(segment = index, error = %e, "Failed to deliver segment");
                            outcome.failed += 1;
                        }
                    }
                }
            }
        }

        info!(
            segments = outcome.segments,
            formatted = outcome.formatted,
            plain_fallbacks = outcome.plain_fallbacks,
            failed = outcome.failed,
            "Delivery finished"
        );
        outcome
    }
}
