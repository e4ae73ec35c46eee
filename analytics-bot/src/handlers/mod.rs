//! Chat handlers: `/report`, `/bot <question>` and message persistence.

mod ask_handler;
mod persistence_handler;
mod report_handler;

use std::sync::Arc;

use chat_analytics::{QueryAnswerer, ReportGenerator};
use storage::MessageStore;
use tokio::sync::RwLock;

use crate::chain::HandlerChain;
use crate::core::Bot;
use crate::delivery::Delivery;

pub use ask_handler::{AskCommandHandler, ASK_GROUP_ONLY, ASK_USAGE, NO_HISTORY_REPLY};
pub use persistence_handler::PersistenceHandler;
pub use report_handler::{ReportCommandHandler, REPORT_GROUP_ONLY, REPORT_IN_PROGRESS};
pub(crate) use report_handler::send_report;

/// Everything the handlers share: transport, store, generators and the bot's own username
/// (filled in by the runner once `getMe` succeeds).
#[derive(Clone)]
pub struct AnalyticsServices {
    pub bot: Arc<dyn Bot>,
    pub store: Arc<dyn MessageStore>,
    pub report_generator: ReportGenerator,
    pub answerer: QueryAnswerer,
    pub delivery: Delivery,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

/// Report → ask → persistence. Persistence works in `before()`, so plain group texts are
/// stored regardless of where the handle phase stops.
pub fn analytics_chain(services: &AnalyticsServices) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(ReportCommandHandler::new(services.clone())))
        .add_handler(Arc::new(AskCommandHandler::new(services.clone())))
        .add_handler(Arc::new(PersistenceHandler::new(services.store.clone())))
}
