//! Message repository: SQLite implementation of [`MessageStore`].
//!
//! External: SQLite via sqlx. The pool serializes writers; readers run concurrently (WAL).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::message_store::MessageStore;
use crate::models::StoredMessage;
use crate::sqlite_pool::SqlitePoolManager;

const SELECT_COLUMNS: &str = "id, chat_id, user_id, user_name, message_text, created_at";

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                platform TEXT NOT NULL DEFAULT 'telegram',
                chat_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                user_name TEXT NOT NULL DEFAULT '',
                message_text TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages(chat_id, created_at);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    #[instrument(skip(self, user_name, text))]
    async fn insert(
        &self,
        chat_id: i64,
        user_id: &str,
        user_name: &str,
        text: &str,
    ) -> Result<StoredMessage, StorageError> {
        let pool = self.pool_manager.pool();

        let sql = format!(
            "INSERT INTO messages (chat_id, user_id, user_name, message_text, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            SELECT_COLUMNS
        );
        let stored = sqlx::query_as::<_, StoredMessage>(&sql)
            .bind(chat_id)
            .bind(user_id)
            .bind(user_name)
            .bind(text)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;

        debug!(
            id = stored.id,
            chat_id = chat_id,
            content_len = text.len(),
            "Saved message"
        );
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn query_range(
        &self,
        chat_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<StoredMessage>, StorageError> {
        let pool = self.pool_manager.pool();

        let sql = format!(
            "SELECT {} FROM messages WHERE chat_id = ? AND created_at >= ? \
             ORDER BY created_at ASC, id ASC",
            SELECT_COLUMNS
        );
        let messages = sqlx::query_as::<_, StoredMessage>(&sql)
            .bind(chat_id)
            .bind(since)
            .fetch_all(pool)
            .await?;

        info!(
            chat_id = chat_id,
            count = messages.len(),
            "Retrieved messages in range"
        );
        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn purge_older_than(&self, age: Duration) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();
        let cutoff = Utc::now() - age;

        let result = sqlx::query("DELETE FROM messages WHERE created_at < ?")
            .bind(cutoff)
            .execute(pool)
            .await?;

        info!(
            deleted = result.rows_affected(),
            cutoff = %cutoff,
            "Purged old messages"
        );
        Ok(result.rows_affected())
    }

    async fn count_by_chat(&self, chat_id: i64) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }
}
