//! Bounded restart loop around one bot run.
//!
//! A run that returns `Ok` is restarted after a short delay; a run that fails is restarted
//! with a linear backoff. The loop gives up after too many consecutive failures or too many
//! restarts in total.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::status::{status_channel, StatusHandle, StatusPublisher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorPolicy {
    /// Total runs allowed, the first one included.
    pub max_restarts: u32,
    pub max_consecutive_failures: u32,
    /// Backoff after the n-th consecutive failure is `n * step`, capped at `max_backoff`.
    pub failure_backoff_step: Duration,
    pub max_backoff: Duration,
    /// Delay before restarting a run that returned normally.
    pub clean_exit_delay: Duration,
}

impl Default for SupervisorPolicy {
    fn default() -> Self {
        Self {
            max_restarts: 10,
            max_consecutive_failures: 3,
            failure_backoff_step: Duration::from_secs(10),
            max_backoff: Duration::from_secs(60),
            clean_exit_delay: Duration::from_secs(5),
        }
    }
}

impl SupervisorPolicy {
    pub fn backoff(&self, consecutive_failures: u32) -> Duration {
        self.failure_backoff_step
            .saturating_mul(consecutive_failures)
            .min(self.max_backoff)
    }
}

/// Why the supervisor stopped restarting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorExit {
    TooManyFailures { consecutive: u32 },
    RestartLimit { runs: u32 },
}

pub struct Supervisor {
    policy: SupervisorPolicy,
    status: StatusPublisher,
}

impl Supervisor {
    /// Returns the supervisor and a read handle on the status it publishes.
    pub fn new(policy: SupervisorPolicy) -> (Self, StatusHandle) {
        let (status, handle) = status_channel();
        (Self { policy, status }, handle)
    }

    pub fn policy(&self) -> &SupervisorPolicy {
        &self.policy
    }

    /// Calls `make_run` until the policy says stop. Each run receives the status publisher.
    pub async fn run<F, Fut>(&self, mut make_run: F) -> SupervisorExit
    where
        F: FnMut(StatusPublisher) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let max = self.policy.max_restarts;
        let mut runs: u32 = 0;
        let mut consecutive_failures: u32 = 0;

        loop {
            if runs >= max {
                error!(runs = runs, "❌ Max restart attempts reached");
                return SupervisorExit::RestartLimit { runs };
            }
            if runs > 0 {
                info!(attempt = runs + 1, max = max, "🔄 Restarting bot");
            }

            self.status.run_started(runs);
            let result = make_run(self.status.clone()).await;
            self.status.mark_stopped();
            runs += 1;

            match result {
                Ok(()) => {
                    consecutive_failures = 0;
                    info!(
                        delay_secs = self.policy.clean_exit_delay.as_secs(),
                        "Bot exited normally, restarting"
                    );
                    tokio::time::sleep(self.policy.clean_exit_delay).await;
                }
                Err(e) => {
                    consecutive_failures += 1;
                    error!(error = %e, consecutive_failures = consecutive_failures, "❌ Bot crashed");

                    if consecutive_failures >= self.policy.max_consecutive_failures {
                        error!("❌ Too many consecutive failures, giving up");
                        return SupervisorExit::TooManyFailures {
                            consecutive: consecutive_failures,
                        };
                    }
                    if runs >= max {
                        error!(runs = runs, "❌ Max restart attempts reached");
                        return SupervisorExit::RestartLimit { runs };
                    }

                    let wait = self.policy.backoff(consecutive_failures);
                    warn!(wait_secs = wait.as_secs(), "⏳ Waiting before restart");
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}
