//! Background jobs: retention purge (at startup and daily at 00:30) and an optional daily
//! report at 23:59, both in local time.

use std::sync::Arc;

use chat_analytics::{ReportGenerator, NO_MESSAGES_REPORT};
use chrono::{DateTime, Days, Duration, Local, TimeZone};
use storage::{report_window, MessageStore};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::core::{ChatTarget, Result};
use crate::delivery::Delivery;
use crate::handlers::send_report;

pub const PURGE_AT: (u32, u32) = (0, 30);
pub const DAILY_REPORT_AT: (u32, u32) = (23, 59);

/// Next occurrence of `hour:minute` strictly after `now`, in `now`'s time zone.
///
/// A wall-clock time skipped by a DST transition on a given day is looked up on the
/// following day.
pub fn next_daily_run<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, minute: u32) -> DateTime<Tz> {
    let tz = now.timezone();
    for offset in 0..=2u64 {
        let candidate = now
            .date_naive()
            .checked_add_days(Days::new(offset))
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .and_then(|naive| tz.from_local_datetime(&naive).earliest());
        if let Some(candidate) = candidate {
            if candidate > *now {
                return candidate;
            }
        }
    }
    now.clone() + Duration::days(1)
}

/// Where and how the scheduled daily report is produced.
#[derive(Clone)]
pub struct ScheduledReport {
    pub chat_id: i64,
    pub generator: ReportGenerator,
    pub delivery: Delivery,
}

#[derive(Clone)]
pub struct Scheduler {
    store: Arc<dyn MessageStore>,
    retention: Duration,
    report: Option<ScheduledReport>,
}

impl Scheduler {
    pub fn new(store: Arc<dyn MessageStore>, retention: Duration) -> Self {
        Self {
            store,
            retention,
            report: None,
        }
    }

    pub fn with_daily_report(mut self, report: Option<ScheduledReport>) -> Self {
        self.report = report;
        self
    }

    /// Deletes messages older than the retention period; failures are logged.
    #[instrument(skip(self))]
    pub async fn purge_once(&self) -> u64 {
        info!("⏰ Running cleanup task");
        match self.store.purge_older_than(self.retention).await {
            Ok(deleted) => {
                info!(deleted = deleted, "✅ Cleanup completed");
                deleted
            }
            Err(e) => {
                error!(error = %e, "❌ Cleanup task failed");
                0
            }
        }
    }

    /// Generates the 24h report for the configured chat and delivers it. No-op without a
    /// configured chat.
    #[instrument(skip(self))]
    pub async fn report_once(&self) {
        let Some(report) = &self.report else {
            warn!("No target chat configured for daily reports");
            return;
        };
        info!(chat_id = report.chat_id, "⏰ Running daily report task");
        if let Err(e) = self.send_daily_report(report).await {
            error!(chat_id = report.chat_id, error = %e, "❌ Daily report task failed");
            let text = format!("❌ Failed to generate daily report: {}", e);
            report
                .delivery
                .deliver(&ChatTarget::chat(report.chat_id), &text, None)
                .await;
        }
    }

    async fn send_daily_report(&self, report: &ScheduledReport) -> Result<()> {
        let messages = self
            .store
            .query_window(report.chat_id, report_window())
            .await?;
        if messages.is_empty() {
            info!(chat_id = report.chat_id, "No messages in the last 24h");
            report
                .delivery
                .deliver(&ChatTarget::chat(report.chat_id), NO_MESSAGES_REPORT, None)
                .await;
            return Ok(());
        }
        let text = report.generator.generate_daily_report(&messages).await;
        send_report(&report.delivery, report.chat_id, &text).await
    }

    /// Runs one purge now, then spawns the daily jobs. Abort the handles to stop them.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        self.purge_once().await;

        let mut handles = Vec::new();
        let purge = self.clone();
        handles.push(tokio::spawn(async move {
            loop {
                sleep_until_local(PURGE_AT).await;
                purge.purge_once().await;
            }
        }));
        info!(hour = PURGE_AT.0, minute = PURGE_AT.1, "📅 Scheduled: database cleanup");

        if self.report.is_some() {
            let reporter = self.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    sleep_until_local(DAILY_REPORT_AT).await;
                    reporter.report_once().await;
                }
            }));
            info!(
                hour = DAILY_REPORT_AT.0,
                minute = DAILY_REPORT_AT.1,
                "📅 Scheduled: daily report"
            );
        } else {
            info!("💡 Scheduled daily report disabled, use /report instead");
        }
        handles
    }
}

async fn sleep_until_local((hour, minute): (u32, u32)) {
    let now = Local::now();
    let next = next_daily_run(&now, hour, minute);
    let wait = (next - now).to_std().unwrap_or_default();
    tokio::time::sleep(wait).await;
}
