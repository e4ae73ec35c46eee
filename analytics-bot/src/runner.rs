//! One bot run: components, scheduler, REPL. The supervisor calls [`run_bot`] repeatedly.

use anyhow::Result;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, build_scheduler};
use crate::config::BotConfig;
use crate::status::StatusPublisher;
use crate::telegram::run_repl;

/// Builds everything from `config`, starts the background jobs and polls until the REPL
/// stops. Background jobs are stopped before returning so restarts never duplicate them.
#[instrument(skip(config, status))]
pub async fn run_bot(config: BotConfig, status: StatusPublisher) -> Result<()> {
    info!("🚀 Telegram Analytics Bot starting");
    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(&components);
    let jobs = build_scheduler(&config, &components).start().await;

    let result = run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        components.services.bot_username.clone(),
        status,
    )
    .await;

    for job in jobs {
        job.abort();
    }
    info!(ok = result.is_ok(), "Bot run finished");
    result
}
