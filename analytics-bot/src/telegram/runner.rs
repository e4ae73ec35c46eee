//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use crate::status::StatusPublisher;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Authenticates with `getMe` (stores the bot username and reports authentication), then
/// runs the teloxide REPL. Each text message is converted to core::Message and handled by
/// `handler_chain` in its own spawned task, so chats are processed concurrently.
///
/// Returns an error when authentication fails; returns `Ok` when polling stops.
#[instrument(skip(bot, handler_chain, bot_username, status))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    status: StatusPublisher,
) -> Result<()> {
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Telegram authentication failed: {}", e))?;
    if let Some(username) = &me.user.username {
        *bot_username.write().await = Some(username.clone());
        info!(username = %username, "Bot username set before repl");
    }
    status.mark_authenticated();
    status.mark_running();
    info!("✅ Bot is now running");

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            if msg.text().is_none() {
                debug!(chat_id = msg.chat.id.0, "Skipping non-text message");
                return respond(());
            }
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                chat_kind = ?core_msg.chat.kind,
                "Received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
                }
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
