//! # Chat analytics
//!
//! The logic between the message store and the model:
//!
//! - [`segment`] – split model output into transport-sized segments
//! - [`transcript`] – render stored messages into model-sized context (chunk-summarize, recent-N)
//! - [`language`] – coarse reply-language inference
//! - [`report`] – daily analytics report generation
//! - [`answer`] – question answering over chat history
//!
//! Generation failures never escape this crate as errors: the generators return a
//! user-facing error text instead.

pub mod answer;
pub mod language;
pub mod report;
pub mod segment;
pub mod transcript;

pub use answer::{QueryAnswerer, NO_HISTORY_ANSWER};
pub use language::detect_language;
pub use report::{ReportGenerator, NO_MESSAGES_REPORT};
pub use segment::{pack, segment, TELEGRAM_MAX_MESSAGE_LEN};
pub use transcript::{
    assemble, assemble_chunked, assemble_recent, chunk_messages, render_line, AssembledContext,
    NO_MESSAGES_SENTINEL, QA_CONTEXT_MAX_CHARS, QA_RECENT_LIMIT, REPORT_CONTEXT_MAX_CHARS,
};
