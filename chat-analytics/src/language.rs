//! Coarse reply-language inference from recent message bodies.

use prompt::Language;
use storage::StoredMessage;

/// Only the most recent messages are sampled.
const SAMPLE_SIZE: usize = 50;
/// Share of Cyrillic letters above which the chat is considered Russian.
const CYRILLIC_THRESHOLD: f64 = 0.3;

/// Russian when more than 30% of the letters in the last 50 messages are Cyrillic,
/// English otherwise (including no messages or no letters at all).
pub fn detect_language(messages: &[StoredMessage]) -> Language {
    let start = messages.len().saturating_sub(SAMPLE_SIZE);
    let sample = messages[start..]
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let (letters, cyrillic) = sample
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, cyrillic), c| {
            let is_cyrillic = ('\u{0400}'..='\u{04FF}').contains(&c);
            (letters + 1, cyrillic + usize::from(is_cyrillic))
        });

    if letters == 0 {
        return Language::English;
    }
    if cyrillic as f64 / letters as f64 > CYRILLIC_THRESHOLD {
        Language::Russian
    } else {
        Language::English
    }
}
