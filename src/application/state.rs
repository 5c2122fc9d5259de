//! # Bot State
//!
//! Process-lifetime state shared by the event handlers and background tasks:
//! configuration, usage counters, the start timestamp and the shutdown signal.
//! Nothing here is persisted.

use crate::application::stats::Stats;
use crate::application::uptime::format_uptime;
use crate::domain::config::AppConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

pub struct BotState {
    pub config: AppConfig,
    pub stats: Arc<Stats>,
    pub started_at: DateTime<Utc>,
    pub http: reqwest::Client,
    shutdown: watch::Sender<bool>,
}

impl BotState {
    pub fn new(config: AppConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            stats: Arc::new(Stats::new()),
            started_at: Utc::now(),
            http: reqwest::Client::new(),
            shutdown,
        }
    }

    pub fn uptime(&self) -> String {
        format_uptime(self.started_at, Utc::now())
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.config.bot.is_owner(user_id)
    }

    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    #[cfg(test)]
    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}
