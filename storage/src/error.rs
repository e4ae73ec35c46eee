//! Storage error types.
//!
//! Used by [`crate::MessageStore`] implementations and callers of storage APIs.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Invalid database config: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Configuration(inner) => StorageError::Config(inner.to_string()),
            other => StorageError::Database(other.to_string()),
        }
    }
}
