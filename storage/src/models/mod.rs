//! Data models for storage.

mod stored_message;

pub use stored_message::StoredMessage;
