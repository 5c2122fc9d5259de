//! # Daily Reminder
//!
//! Sends a direct message to one user at the same local wall-clock time
//! every day.

use crate::domain::traits::BotClient;
use crate::strings::logs;
use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const ONE_DAY: Duration = Duration::from_secs(24 * 3600);

/// Real time from `now` until the next `at` on the wall clock of `now`'s
/// zone: later today, otherwise tomorrow. Days whose clock skips `at` move on
/// to the following day; days that repeat it use the first occurrence.
pub fn until_next<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Duration {
    let zone = now.timezone();
    let today = now.date_naive();
    (0..=2)
        .filter_map(|days| today.checked_add_days(Days::new(days)))
        .filter_map(|date| zone.from_local_datetime(&date.and_time(at)).earliest())
        .find(|next| next > now)
        .and_then(|next| (next - now.clone()).to_std().ok())
        .unwrap_or(ONE_DAY)
}

pub struct Reminder {
    pub user: String,
    pub at: NaiveTime,
    pub message: String,
}

pub async fn run_daily_reminder(client: Arc<dyn BotClient>, reminder: Reminder, shutdown: watch::Receiver<bool>) {
    run_with_clock(client, reminder, shutdown, Local::now).await;
}

async fn run_with_clock<Tz, F>(
    client: Arc<dyn BotClient>,
    reminder: Reminder,
    mut shutdown: watch::Receiver<bool>,
    now: F,
) where
    Tz: TimeZone,
    F: Fn() -> DateTime<Tz>,
{
    tracing::info!("{}", logs::task_started("daily reminder"));

    loop {
        let wait = until_next(&now(), reminder.at);
        tracing::debug!("{}", logs::reminder_scheduled(&reminder.user, wait.as_secs()));

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                match client.direct_message(&reminder.user, &reminder.message).await {
                    Ok(()) => tracing::info!("{}", logs::reminder_sent(&reminder.user)),
                    Err(e) => tracing::error!("{}", logs::reminder_fail(&reminder.user, &e)),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
