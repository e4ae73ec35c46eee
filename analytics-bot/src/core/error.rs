//! Error types for the bot core.
//!
//! [`DbotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use storage::StorageError;
use thiserror::Error;

/// Top-level error (store, bot transport, handler).
#[derive(Error, Debug)]
pub enum DbotError {
    /// Store failure; displayed as the storage error itself.
    #[error(transparent)]
    Database(#[from] StorageError),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by command handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{failed} of {segments} segments could not be delivered")]
    DeliveryFailed { failed: usize, segments: usize },
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
