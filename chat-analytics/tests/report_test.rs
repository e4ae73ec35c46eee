//! Tests for the daily report generator against a scripted LLM client.
//! External interactions: none (MockLlm records prompts instead of calling a provider).

mod common;

use std::sync::Arc;

use chat_analytics::{ReportGenerator, NO_MESSAGES_REPORT};
use common::{message, messages, MockLlm};

/// **Test: an empty window yields the fixed no-messages report without a model call.**
#[tokio::test]
async fn empty_window_skips_model() {
    let llm = Arc::new(MockLlm::replying("report"));
    let generator = ReportGenerator::new(llm.clone());

    let report = generator.generate_daily_report(&[]).await;

    assert_eq!(report, NO_MESSAGES_REPORT);
    assert_eq!(llm.call_count(), 0);
}

/// **Test: a ~10k character window goes to the model in a single report call.**
#[tokio::test]
async fn small_window_single_call() {
    let llm = Arc::new(MockLlm::replying("report"));
    let generator = ReportGenerator::new(llm.clone());
    let ms = messages(50, 173);

    let report = generator.generate_daily_report(&ms).await;

    assert_eq!(report, "report #1");
    assert_eq!(llm.call_count(), 1);
    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("m00000"));
    assert!(prompt.contains("m00049"));
    assert!(prompt.contains("Respond in English"));
}

/// **Test: an ~80k character window is summarized in chunks before the report call.**
///
/// Setup: 400 messages of 200 rendered characters, threshold 30k.
/// Expected: 3 summary calls on chunks of at most 30k characters, then one report call
/// whose context is the summaries joined by blank lines.
#[tokio::test]
async fn large_window_is_chunk_summarized() {
    let llm = Arc::new(MockLlm::replying("summary"));
    let generator = ReportGenerator::new(llm.clone());
    let ms = messages(400, 173);

    let report = generator.generate_daily_report(&ms).await;

    assert_eq!(llm.call_count(), 4);
    assert_eq!(report, "summary #4");
    let prompts = llm.prompts();
    for p in &prompts[..3] {
        assert!(p.starts_with("Summarize the key topics"));
        assert!(p.chars().count() <= 30_000 + 100);
    }
    assert!(prompts[0].contains("m00000"));
    assert!(prompts[2].contains("m00399"));
    assert!(prompts[3].contains("summary #1\n\nsummary #2\n\nsummary #3"));
    assert!(!prompts[3].contains("m00000"));
}

/// **Test: a failed chunk summary is left out and the report is still produced.**
#[tokio::test]
async fn failed_chunk_is_omitted() {
    let llm = Arc::new(MockLlm::replying("summary").failing_when_contains("m00200"));
    let generator = ReportGenerator::new(llm.clone());
    let ms = messages(400, 173);

    let report = generator.generate_daily_report(&ms).await;

    assert_eq!(llm.call_count(), 4);
    assert_eq!(report, "summary #4");
    assert!(llm.prompts()[3].contains("summary #1\n\nsummary #3"));
}

/// **Test: when every chunk fails no report call is made and an error text is returned.**
#[tokio::test]
async fn all_chunks_failed_returns_error_text() {
    let llm = Arc::new(MockLlm::failing());
    let generator = ReportGenerator::new(llm.clone());
    let ms = messages(400, 173);

    let report = generator.generate_daily_report(&ms).await;

    assert_eq!(llm.call_count(), 3);
    assert!(report.starts_with("❌ Failed to generate report:"));
}

/// **Test: a provider error on the report call becomes a user-facing text, not a panic.**
#[tokio::test]
async fn provider_error_becomes_text() {
    let llm = Arc::new(MockLlm::failing());
    let generator = ReportGenerator::new(llm.clone());

    let report = generator
        .generate_daily_report(&[message(1, "@a", "hello", 0)])
        .await;

    assert_eq!(report, "❌ Failed to generate report: provider unavailable");
}

/// **Test: a mostly Cyrillic chat asks for a Russian report.**
#[tokio::test]
async fn russian_chat_requests_russian_report() {
    let llm = Arc::new(MockLlm::replying("отчёт"));
    let generator = ReportGenerator::new(llm.clone());
    let ms = vec![
        message(1, "@ivan", "Привет, когда релиз?", 0),
        message(2, "@olga", "Завтра утром", 1),
    ];

    generator.generate_daily_report(&ms).await;

    assert!(llm.prompts()[0].contains("Respond in Russian"));
}

/// **Test: a custom threshold changes when chunking starts.**
#[tokio::test]
async fn custom_threshold_triggers_chunking() {
    let llm = Arc::new(MockLlm::replying("s"));
    let generator = ReportGenerator::new(llm.clone()).with_max_context_chars(1_000);
    assert_eq!(generator.max_context_chars(), 1_000);

    generator.generate_daily_report(&messages(20, 173)).await;

    assert!(llm.call_count() > 1);
    assert!(llm.prompts()[0].starts_with("Summarize"));
}
