//! Handler that logs plain group texts to the retention store in before().

use std::sync::Arc;

use async_trait::async_trait;
use storage::MessageStore;
use tracing::{debug, error, instrument};

use crate::core::{Handler, Message, Result};

/// Saves each plain (non-command) group text to the given [`MessageStore`] in before();
/// always continues. Store failures are logged and the message is dropped.
#[derive(Clone)]
pub struct PersistenceHandler {
    store: Arc<dyn MessageStore>,
}

impl PersistenceHandler {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    fn should_store(message: &Message) -> bool {
        message.chat.is_group_context() && !message.content.trim_start().starts_with('/')
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !Self::should_store(message) {
            debug!(chat_kind = ?message.chat.kind, "Not a plain group text, not stored");
            return Ok(true);
        }

        let user_name = message.user.display_name();
        match self
            .store
            .insert(
                message.chat.id,
                &message.user.id.to_string(),
                &user_name,
                &message.content,
            )
            .await
        {
            Ok(stored) => debug!(id = stored.id, user_name = %user_name, "Message stored"),
            Err(e) => error!(error = %e, "Failed to store message"),
        }

        Ok(true)
    }
}
