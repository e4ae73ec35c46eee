//! Daily analytics report over the last 24 hours of a chat.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{chunk_summary_prompt, report_prompt};
use storage::StoredMessage;
use tracing::{error, info, instrument};

use crate::language::detect_language;
use crate::transcript::{assemble_chunked, REPORT_CONTEXT_MAX_CHARS};

/// Report text for a window without messages. Produced without calling the model.
pub const NO_MESSAGES_REPORT: &str =
    "📊 *Daily Report*\n\nNo messages were recorded in the last 24 hours.";

/// Builds the daily report: transcript (chunk-summarized when too large) into one
/// report prompt, one generative call.
///
/// **External interactions:** the LLM provider through [`LlmClient`].
#[derive(Clone)]
pub struct ReportGenerator {
    llm: Arc<dyn LlmClient>,
    max_context_chars: usize,
}

impl ReportGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_context_chars: REPORT_CONTEXT_MAX_CHARS,
        }
    }

    /// Transcript size above which chunk summarization kicks in.
    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars.max(1);
        self
    }

    pub fn max_context_chars(&self) -> usize {
        self.max_context_chars
    }

    /// Returns the report text, or a user-facing error text. Never fails.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn generate_daily_report(&self, messages: &[StoredMessage]) -> String {
        if messages.is_empty() {
            return NO_MESSAGES_REPORT.to_string();
        }

        match self.try_generate(messages).await {
            Ok(report) => {
                info!(report_chars = report.chars().count(), "Report generated");
                report
            }
            Err(e) => {
                error!(error = %e, "Report generation failed");
                format!("❌ Failed to generate report: {}", e)
            }
        }
    }

    async fn try_generate(&self, messages: &[StoredMessage]) -> anyhow::Result<String> {
        let language = detect_language(messages);
        let llm = Arc::clone(&self.llm);
        let context = assemble_chunked(messages, self.max_context_chars, |index, chunk| {
            let llm = Arc::clone(&llm);
            async move {
                info!(chunk = index, chunk_chars = chunk.chars().count(), "Summarizing chunk");
                llm.generate(&chunk_summary_prompt(&chunk)).await
            }
        })
        .await;

        if context.is_chunked() && context.summarized_chunks == 0 {
            anyhow::bail!(
                "all {} context chunks failed to summarize",
                context.chunk_count
            );
        }

        info!(
            language = %language,
            context_chars = context.text.chars().count(),
            chunks = context.chunk_count,
            "Requesting report"
        );
        self.llm
            .generate(&report_prompt(&context.text, language))
            .await
    }
}
