//! # Usage Statistics
//!
//! Session and rolling-window counters for command usage. Updates come from
//! the event handlers, the window reset from a single reporter task.

use crate::application::logging::USAGE_TARGET;
use crate::strings::logs;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Default)]
struct Counters {
    total_commands: u64,
    window_commands: u64,
    session_users: HashSet<String>,
    window_users: HashSet<String>,
    total_errors: u64,
    window_errors: u64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsReport {
    pub total_commands: u64,
    pub window_commands: u64,
    pub session_users: usize,
    pub window_users: usize,
    pub total_errors: u64,
    pub window_errors: u64,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "commands: {} total, {} this window | users: {} total, {} this window | errors: {} total, {} this window",
            self.total_commands,
            self.window_commands,
            self.session_users,
            self.window_users,
            self.total_errors,
            self.window_errors
        )
    }
}

/// Process-lifetime counters. Every method is a single locked update; the
/// lock is never held across an await.
#[derive(Debug, Default)]
pub struct Stats {
    inner: Mutex<Counters>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        // A panic while holding the lock leaves plain counters behind, still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_command(&self, user_id: &str) {
        let mut c = self.lock();
        c.total_commands += 1;
        c.window_commands += 1;
        c.session_users.insert(user_id.to_string());
        c.window_users.insert(user_id.to_string());
    }

    pub fn record_error(&self) {
        let mut c = self.lock();
        c.total_errors += 1;
        c.window_errors += 1;
    }

    pub fn snapshot(&self) -> StatsReport {
        let c = self.lock();
        StatsReport {
            total_commands: c.total_commands,
            window_commands: c.window_commands,
            session_users: c.session_users.len(),
            window_users: c.window_users.len(),
            total_errors: c.total_errors,
            window_errors: c.window_errors,
        }
    }

    /// Returns the closing window's report and starts a new window.
    /// Session totals are left untouched.
    pub fn roll_window(&self) -> StatsReport {
        let mut c = self.lock();
        let report = StatsReport {
            total_commands: c.total_commands,
            window_commands: c.window_commands,
            session_users: c.session_users.len(),
            window_users: c.window_users.len(),
            total_errors: c.total_errors,
            window_errors: c.window_errors,
        };
        c.window_commands = 0;
        c.window_users.clear();
        c.window_errors = 0;
        report
    }
}

/// Logs a report and resets the window every `interval` until shutdown.
pub async fn run_reporter(stats: Arc<Stats>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(interval);
    // First tick completes immediately; the first report is due one interval in.
    ticker.tick().await;
    tracing::info!("{}", logs::task_started("stats reporter"));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = stats.roll_window();
                tracing::info!(target: USAGE_TARGET, "{}", logs::stats_report(&report));
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
