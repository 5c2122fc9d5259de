//! # Time Formatting
//!
//! Uptime and timestamp rendering shared by the info and admin commands.

use chrono::{DateTime, TimeZone, Utc};

/// `"{d}d {h}h {m}m {s}s"` for the time between `start` and `now`.
/// A `now` before `start` counts as zero.
pub fn format_uptime(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let total = (now - start).num_seconds().max(0);

    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    format!("{days}d {hours}h {minutes}m {seconds}s")
}

pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
