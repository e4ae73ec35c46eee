//! Storage crate: retention store for group chat messages.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – StoredMessage
//! - [`message_store`] – MessageStore trait and retention windows
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_repo;
mod message_store;
mod models;
mod sqlite_pool;

pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use message_store::{
    qa_window, report_window, retention_age, MessageStore, QA_WINDOW_DAYS, REPORT_WINDOW_HOURS,
    RETENTION_DAYS,
};
pub use models::StoredMessage;
pub use sqlite_pool::SqlitePoolManager;
