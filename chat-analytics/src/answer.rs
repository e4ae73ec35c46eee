//! Question answering over the last 14 days of a chat.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::question_prompt;
use storage::StoredMessage;
use tracing::{error, info, instrument};

use crate::language::detect_language;
use crate::transcript::{assemble_recent, QA_CONTEXT_MAX_CHARS, QA_RECENT_LIMIT};

/// Answer for a chat without stored history. Produced without calling the model.
pub const NO_HISTORY_ANSWER: &str = "I don't have any message history to answer your question.";

#[derive(Clone)]
pub struct QueryAnswerer {
    llm: Arc<dyn LlmClient>,
    max_context_chars: usize,
    recent_limit: usize,
}

impl QueryAnswerer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_context_chars: QA_CONTEXT_MAX_CHARS,
            recent_limit: QA_RECENT_LIMIT,
        }
    }

    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars.max(1);
        self
    }

    /// Messages kept when the transcript exceeds the context limit.
    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit.max(1);
        self
    }

    /// Answers `question` from `messages`; a user-facing error text on failure.
    #[instrument(skip(self, question, messages), fields(message_count = messages.len()))]
    pub async fn answer_question(&self, question: &str, messages: &[StoredMessage]) -> String {
        if messages.is_empty() {
            return NO_HISTORY_ANSWER.to_string();
        }

        let language = detect_language(messages);
        let context = assemble_recent(messages, self.max_context_chars, self.recent_limit);
        info!(
            language = %language,
            context_chars = context.text.chars().count(),
            truncated = context.truncated,
            "Requesting answer"
        );

        match self
            .llm
            .generate(&question_prompt(&context.text, question, language))
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "Answer generation failed");
                format!(
                    "❌ I encountered an error while processing your question: {}",
                    e
                )
            }
        }
    }
}
