//! Tests for context assembly: line rendering, chunk-summarize and recent-N policies.
//! External interactions: none (summarizers are in-test closures).

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use chat_analytics::{
    assemble, assemble_chunked, assemble_recent, chunk_messages, render_line,
    NO_MESSAGES_SENTINEL,
};
use common::{message, messages};

/// **Test: a stored message renders as `[YYYY-MM-DD HH:MM] author: body`.**
#[test]
fn render_line_format() {
    let m = message(1, "@alice", "ship it", 75);
    assert_eq!(render_line(&m), "[2024-05-01 10:15] @alice: ship it");
}

/// **Test: multi-line bodies are flattened so every message is exactly one line.**
#[test]
fn render_line_flattens_newlines() {
    let m = message(1, "Bob Smith", "first\nsecond\r\nthird", 0);
    assert_eq!(
        render_line(&m),
        "[2024-05-01 09:00] Bob Smith: first second third"
    );
}

/// **Test: a blank display name falls back to the user id.**
#[test]
fn render_line_blank_author_uses_user_id() {
    let mut m = message(42, "", "hi", 0);
    m.user_id = "42".to_string();
    assert_eq!(render_line(&m), "[2024-05-01 09:00] 42: hi");
}

/// **Test: no messages yields the sentinel, several yield one line each in order.**
#[test]
fn assemble_empty_and_ordered() {
    assert_eq!(assemble(&[]), NO_MESSAGES_SENTINEL);

    let ms = vec![
        message(1, "@a", "one", 0),
        message(2, "@b", "two", 1),
        message(3, "@a", "three", 2),
    ];
    let text = assemble(&ms);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("@a: one"));
    assert!(lines[1].ends_with("@b: two"));
    assert!(lines[2].ends_with("@a: three"));
}

/// **Test: chunks respect the size bound and together contain every message in order.**
#[test]
fn chunk_messages_bounded_and_complete() {
    let ms = messages(400, 173);
    let chunks = chunk_messages(&ms, 30_000);

    assert!(chunks.len() >= 2);
    for c in &chunks {
        assert!(c.chars().count() <= 30_000);
    }
    assert_eq!(chunks.join("\n"), assemble(&ms));
}

/// **Test: a single oversized message is hard-split rather than breaking the bound.**
#[test]
fn chunk_messages_splits_oversized_message() {
    let ms = vec![message(1, "@a", &"y".repeat(250), 0)];
    let chunks = chunk_messages(&ms, 100);
    assert_eq!(chunks.len(), 3);
    for c in &chunks {
        assert!(c.chars().count() <= 100);
    }
    assert_eq!(chunks.concat(), render_line(&ms[0]));
}

/// **Test: transcript under the threshold is returned as is without summarizing.**
#[tokio::test]
async fn assemble_chunked_small_context_passes_through() {
    let ms = messages(10, 50);
    let calls = AtomicUsize::new(0);

    let context = assemble_chunked(&ms, 30_000, |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, anyhow::Error>("unused".to_string()) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(context.text, assemble(&ms));
    assert!(!context.is_chunked());
}

/// **Test: large transcript is summarized chunk by chunk, failures are left out.**
///
/// Setup: ~80k characters of messages, threshold 30k. Summarizer fails for chunk 1.
/// Expected: summaries of chunks 0 and 2 joined by a blank line, in order.
#[tokio::test]
async fn assemble_chunked_summarizes_and_omits_failures() {
    let ms = messages(400, 173);
    let mut seen = Vec::new();

    let context = assemble_chunked(&ms, 30_000, |index, chunk| {
        seen.push((index, chunk.chars().count()));
        async move {
            if index == 1 {
                Err(anyhow!("boom"))
            } else {
                Ok(format!("summary {}", index))
            }
        }
    })
    .await;

    assert_eq!(context.chunk_count, 3);
    assert_eq!(context.summarized_chunks, 2);
    assert_eq!(context.text, "summary 0\n\nsummary 2");
    assert_eq!(seen.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(seen.iter().all(|(_, len)| *len <= 30_000));
}

/// **Test: oversized Q&A transcript keeps the last 500 messages behind a note.**
#[test]
fn assemble_recent_keeps_last_messages() {
    let ms = messages(1000, 73);
    let context = assemble_recent(&ms, 40_000, 500);

    assert!(context.truncated);
    assert!(context
        .text
        .starts_with("[Showing last 500 messages]\n\n"));
    assert!(context.text.contains("m00500"));
    assert!(context.text.contains("m00999"));
    assert!(!context.text.contains("m00499"));
    assert_eq!(context.text.lines().count(), 2 + 500);
}

/// **Test: the note reports the actual count when fewer messages than the limit remain.**
#[test]
fn assemble_recent_note_uses_actual_count() {
    let ms = messages(10, 5_000);
    let context = assemble_recent(&ms, 40_000, 500);
    assert!(context.text.starts_with("[Showing last 10 messages]"));
}

/// **Test: Q&A transcript under the threshold is untouched.**
#[test]
fn assemble_recent_small_context_passes_through() {
    let ms = messages(20, 40);
    let context = assemble_recent(&ms, 40_000, 500);
    assert!(!context.truncated);
    assert_eq!(context.text, assemble(&ms));
}
