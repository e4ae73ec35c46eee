//! Stored message model.
//!
//! Maps to the `messages` table. Rows are immutable once written; `id` and
//! `created_at` are assigned by the store on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged group chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredMessage {
    /// Autoincrement row id; breaks ties between equal timestamps.
    pub id: i64,
    pub chat_id: i64,
    /// Transport user id, kept as text.
    pub user_id: String,
    /// Display name at the time of writing (may be empty).
    pub user_name: String,
    /// Message body (may be empty).
    #[sqlx(rename = "message_text")]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    /// Name shown in transcripts: display name, or the user id when the name is empty.
    pub fn author(&self) -> &str {
        if self.user_name.trim().is_empty() {
            &self.user_id
        } else {
            &self.user_name
        }
    }
}
