//! Process status shared between the supervisor (writer) and any reader.
//!
//! Backed by a `tokio::sync::watch` channel: [`StatusPublisher`] owns the write side,
//! [`StatusHandle`] hands out snapshots and change notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Point-in-time status of the bot process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotStatus {
    /// Polling for updates.
    pub running: bool,
    /// Telegram accepted the token (`getMe` succeeded) in the current run.
    pub authenticated: bool,
    /// Start of the current run.
    pub started_at: Option<DateTime<Utc>>,
    /// Runs started after the first one.
    pub restarts: u32,
}

impl BotStatus {
    pub fn state(&self) -> &'static str {
        if self.running {
            "running"
        } else {
            "starting"
        }
    }
}

/// Write side. Cloned into each run so the runner can report authentication.
#[derive(Clone)]
pub struct StatusPublisher {
    tx: Arc<watch::Sender<BotStatus>>,
}

/// Read side.
#[derive(Clone)]
pub struct StatusHandle {
    rx: watch::Receiver<BotStatus>,
}

pub fn status_channel() -> (StatusPublisher, StatusHandle) {
    let (tx, rx) = watch::channel(BotStatus::default());
    (StatusPublisher { tx: Arc::new(tx) }, StatusHandle { rx })
}

impl StatusPublisher {
    pub fn handle(&self) -> StatusHandle {
        StatusHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// A new run begins: not yet running or authenticated.
    pub fn run_started(&self, restarts: u32) {
        self.tx.send_modify(|s| {
            s.running = false;
            s.authenticated = false;
            s.started_at = Some(Utc::now());
            s.restarts = restarts;
        });
    }

    pub fn mark_authenticated(&self) {
        self.tx.send_modify(|s| s.authenticated = true);
    }

    pub fn mark_running(&self) {
        self.tx.send_modify(|s| s.running = true);
    }

    pub fn mark_stopped(&self) {
        self.tx.send_modify(|s| {
            s.running = false;
            s.authenticated = false;
        });
    }
}

impl StatusHandle {
    pub fn snapshot(&self) -> BotStatus {
        self.rx.borrow().clone()
    }

    /// Waits for the next status change; `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<BotStatus> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
