//! # Telegram group analytics bot
//!
//! Logs plain group texts to a 14-day retention store and answers two commands:
//! `/report` (detailed report over the last 24 hours) and `/bot <question>` (Q&A over the
//! last 14 days). Generation lives in `chat-analytics`; this crate wires transport, handlers,
//! delivery, the scheduler and the restart supervisor.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod core;
pub mod delivery;
pub mod handlers;
pub mod runner;
pub mod scheduler;
pub mod status;
pub mod supervisor;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, Chat, ChatKind, ChatTarget, DbotError, Handler,
    HandlerError, HandlerResponse, Message, Result, TextFormat, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;
pub use commands::{parse_command, Command, ParsedCommand};
pub use delivery::{Delivery, DeliveryOutcome, ReportHeader, EMPTY_TEXT_NOTICE};

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{AnalyticsConfig, BaseConfig, BotConfig};
pub use runner::run_bot;

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use handlers::{
    analytics_chain, AnalyticsServices, AskCommandHandler, PersistenceHandler,
    ReportCommandHandler,
};
pub use scheduler::{next_daily_run, ScheduledReport, Scheduler};
pub use status::{status_channel, BotStatus, StatusHandle, StatusPublisher};
pub use supervisor::{Supervisor, SupervisorExit, SupervisorPolicy};
