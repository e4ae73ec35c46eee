//! Context assembly: renders stored messages into the transcript handed to the model.
//!
//! Two size policies keep oversized windows out of a single request:
//!
//! - reports: [`assemble_chunked`] partitions the messages and summarizes each chunk,
//! - Q&A: [`assemble_recent`] keeps only the most recent messages.

use std::future::Future;

use storage::StoredMessage;
use tracing::{error, info};

use crate::segment::{char_len, pack};

/// Transcript text when there is nothing to render.
pub const NO_MESSAGES_SENTINEL: &str = "No messages available.";
/// Above this many characters a report transcript is chunked and summarized.
pub const REPORT_CONTEXT_MAX_CHARS: usize = 30_000;
/// Above this many characters a Q&A transcript is cut to the most recent messages.
pub const QA_CONTEXT_MAX_CHARS: usize = 40_000;
/// Messages kept by the Q&A truncation policy.
pub const QA_RECENT_LIMIT: usize = 500;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Transcript plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub text: String,
    /// Chunks the transcript was split into; 0 when sent whole.
    pub chunk_count: usize,
    /// Chunks whose summary made it into `text`.
    pub summarized_chunks: usize,
    /// True when older messages were left out.
    pub truncated: bool,
}

impl AssembledContext {
    fn whole(text: String) -> Self {
        Self {
            text,
            chunk_count: 0,
            summarized_chunks: 0,
            truncated: false,
        }
    }

    pub fn is_chunked(&self) -> bool {
        self.chunk_count > 0
    }
}

/// `[YYYY-MM-DD HH:MM] author: body`, always a single line.
pub fn render_line(message: &StoredMessage) -> String {
    let body = message.content.replace("\r\n", " ").replace(['\n', '\r'], " ");
    format!(
        "[{}] {}: {}",
        message.created_at.format(TIMESTAMP_FORMAT),
        message.author(),
        body
    )
}

/// One line per message in input order, or [`NO_MESSAGES_SENTINEL`] for no messages.
pub fn assemble(messages: &[StoredMessage]) -> String {
    if messages.is_empty() {
        return NO_MESSAGES_SENTINEL.to_string();
    }
    messages
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ordered sub-transcripts of at most `max_chars` characters each.
pub fn chunk_messages(messages: &[StoredMessage], max_chars: usize) -> Vec<String> {
    pack(messages.iter().map(render_line), max_chars)
}

/// Report policy: the whole transcript when it fits in `max_chars`, otherwise the
/// blank-line-joined summaries of its chunks.
///
/// `summarize(index, chunk)` is awaited once per chunk, in order. A failed chunk is logged
/// and left out.
pub async fn assemble_chunked<F, Fut>(
    messages: &[StoredMessage],
    max_chars: usize,
    mut summarize: F,
) -> AssembledContext
where
    F: FnMut(usize, String) -> Fut,
    Fut: Future<Output = anyhow::Result<String>>,
{
    let transcript = assemble(messages);
    let transcript_chars = char_len(&transcript);
    if transcript_chars <= max_chars {
        return AssembledContext::whole(transcript);
    }

    let chunks = chunk_messages(messages, max_chars);
    let chunk_count = chunks.len();
    info!(
        transcript_chars = transcript_chars,
        max_chars = max_chars,
        chunk_count = chunk_count,
        "Large context, summarizing in chunks"
    );

    let mut summaries = Vec::with_capacity(chunk_count);
    for (index, chunk) in chunks.into_iter().enumerate() {
        match summarize(index, chunk).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!(chunk = index, error = %e, "Chunk summarization failed, omitting chunk");
            }
        }
    }

    AssembledContext {
        summarized_chunks: summaries.len(),
        text: summaries.join("\n\n"),
        chunk_count,
        truncated: false,
    }
}

/// Q&A policy: the whole transcript when it fits in `max_chars`, otherwise only the last
/// `recent_limit` messages behind a note saying older history was left out.
pub fn assemble_recent(
    messages: &[StoredMessage],
    max_chars: usize,
    recent_limit: usize,
) -> AssembledContext {
    let transcript = assemble(messages);
    if char_len(&transcript) <= max_chars {
        return AssembledContext::whole(transcript);
    }

    let start = messages.len().saturating_sub(recent_limit);
    let recent = &messages[start..];
    info!(
        total = messages.len(),
        kept = recent.len(),
        "Large context, keeping most recent messages only"
    );

    AssembledContext {
        text: format!(
            "[Showing last {} messages]\n\n{}",
            recent.len(),
            assemble(recent)
        ),
        chunk_count: 0,
        summarized_chunks: 0,
        truncated: true,
    }
}
