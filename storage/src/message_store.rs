//! Retention store trait. [`crate::MessageRepository`] is the SQLite implementation;
//! tests substitute in-memory or counting stores.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::error::StorageError;
use super::models::StoredMessage;

/// Messages older than this are purged.
pub const RETENTION_DAYS: i64 = 14;
/// Window read by `/report`.
pub const REPORT_WINDOW_HOURS: i64 = 24;
/// Window read by `/bot <question>`.
pub const QA_WINDOW_DAYS: i64 = 14;

pub fn retention_age() -> Duration {
    Duration::days(RETENTION_DAYS)
}

pub fn report_window() -> Duration {
    Duration::hours(REPORT_WINDOW_HOURS)
}

pub fn qa_window() -> Duration {
    Duration::days(QA_WINDOW_DAYS)
}

/// Append-only message log with time-bounded range reads and age-based deletion.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends a message; the store assigns `id` and `created_at`.
    async fn insert(
        &self,
        chat_id: i64,
        user_id: &str,
        user_name: &str,
        text: &str,
    ) -> Result<StoredMessage, StorageError>;

    /// Messages of `chat_id` with `created_at >= since`, ascending by time.
    async fn query_range(
        &self,
        chat_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<StoredMessage>, StorageError>;

    /// Deletes every message older than `age`; returns the number of deleted rows.
    async fn purge_older_than(&self, age: Duration) -> Result<u64, StorageError>;

    /// Total stored messages for a chat.
    async fn count_by_chat(&self, chat_id: i64) -> Result<i64, StorageError>;

    /// Messages of `chat_id` written within the last `window`.
    async fn query_window(
        &self,
        chat_id: i64,
        window: Duration,
    ) -> Result<Vec<StoredMessage>, StorageError> {
        self.query_range(chat_id, Utc::now() - window).await
    }
}
