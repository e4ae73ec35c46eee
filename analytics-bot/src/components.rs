//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use chat_analytics::{QueryAnswerer, ReportGenerator};
use llm_client::{LlmClient, OpenAILlmClient};
use storage::{MessageRepository, MessageStore};
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::{BaseConfig, BotConfig};
use crate::core::Bot as CoreBot;
use crate::delivery::Delivery;
use crate::handlers::{analytics_chain, AnalyticsServices};
use crate::scheduler::{ScheduledReport, Scheduler};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for one bot run.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub services: AnalyticsServices,
}

/// Opens the SQLite message store and creates the schema.
#[instrument(skip(config))]
pub async fn open_store(config: &BaseConfig) -> Result<Arc<dyn MessageStore>> {
    let repo = MessageRepository::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url,
                "Failed to initialize message storage"
            );
            anyhow::anyhow!("Failed to initialize message storage: {}", e)
        })?;
    info!(database_url = %config.database_url, "📦 Message storage ready");
    Ok(Arc::new(repo))
}

/// teloxide Bot for the configured token, pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BaseConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds BotComponents around an already opened store.
pub fn build_bot_components_with_store(
    config: &BotConfig,
    store: Arc<dyn MessageStore>,
) -> BotComponents {
    let teloxide_bot = build_teloxide_bot(config.base());
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(config.llm()));
    let analytics = config.analytics();
    let report_generator = ReportGenerator::new(llm.clone())
        .with_max_context_chars(analytics.report_context_max_chars);
    let answerer = QueryAnswerer::new(llm)
        .with_max_context_chars(analytics.qa_context_max_chars)
        .with_recent_limit(analytics.qa_recent_limit);

    let services = AnalyticsServices {
        delivery: Delivery::new(bot.clone()),
        bot,
        store,
        report_generator,
        answerer,
        bot_username: Arc::new(tokio::sync::RwLock::new(None)),
    };

    BotComponents {
        teloxide_bot,
        services,
    }
}

#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let store = open_store(config.base()).await?;
    Ok(build_bot_components_with_store(config, store))
}

/// Builds the handler chain (report → ask → persistence).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    analytics_chain(&components.services)
}

/// Retention purge plus the daily report when REPORT_CHAT_ID is set.
pub fn build_scheduler(config: &BotConfig, components: &BotComponents) -> Scheduler {
    let services = &components.services;
    let report = config
        .analytics()
        .report_chat_id
        .map(|chat_id| ScheduledReport {
            chat_id,
            generator: services.report_generator.clone(),
            delivery: services.delivery.clone(),
        });
    Scheduler::new(services.store.clone(), config.analytics().retention()).with_daily_report(report)
}
