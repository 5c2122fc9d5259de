//! # Logging
//!
//! Builds the global subscriber: console output plus three daily-rotated
//! files under the log directory.
//!
//! * `bot.log`: every event that passes the filter.
//! * `usage.log`: command usage lines and stats reports (target `usage`).
//! * `errors.log`: failed commands (target `errors`) and anything at `ERROR`.
//!
//! Rotated files are named `<file>.<YYYY-MM-DD>`.

use crate::domain::types::Invocation;
use crate::strings::logs;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const USAGE_TARGET: &str = "usage";
pub const ERRORS_TARGET: &str = "errors";

pub const ALL_LOG: &str = "bot.log";
pub const USAGE_LOG: &str = "usage.log";
pub const ERRORS_LOG: &str = "errors.log";

const DEFAULT_FILTER: &str =
    "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn";

/// Flushes the file writers when dropped. Hold for the life of the process.
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Installs the subscriber built by [`subscriber`] as the global default.
pub fn init(log_dir: &Path) -> Result<LogGuards> {
    let (subscriber, guards) = subscriber(log_dir)?;
    subscriber
        .try_init()
        .context("Failed to install the tracing subscriber")?;
    Ok(guards)
}

/// The layered subscriber and the guards of its file writers.
pub fn subscriber(log_dir: &Path) -> Result<(impl Subscriber + Send + Sync + 'static, LogGuards)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let (all_writer, all_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, ALL_LOG));
    let (usage_writer, usage_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, USAGE_LOG));
    let (errors_writer, errors_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, ERRORS_LOG));

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let all_layer = tracing_subscriber::fmt::layer()
        .with_writer(all_writer)
        .with_ansi(false);

    let usage_layer = tracing_subscriber::fmt::layer()
        .with_writer(usage_writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter_fn(|meta| meta.target() == USAGE_TARGET));

    let errors_layer = tracing_subscriber::fmt::layer()
        .with_writer(errors_writer)
        .with_ansi(false)
        .with_filter(filter_fn(|meta| {
            meta.target() == ERRORS_TARGET || *meta.level() == Level::ERROR
        }));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(all_layer)
        .with(usage_layer)
        .with(errors_layer);

    let guards = LogGuards {
        _guards: vec![all_guard, usage_guard, errors_guard],
    };
    Ok((subscriber, guards))
}

/// One line in the usage log for a handled command.
pub fn usage(invocation: &Invocation, detail: &str) {
    tracing::info!(
        target: USAGE_TARGET,
        "{}",
        logs::usage_line(&invocation.sender, &invocation.room_id, detail)
    );
}

/// One line in the error log for a failed command.
pub fn command_error(invocation: &Invocation, kind: &str, message: &str) {
    tracing::error!(
        target: ERRORS_TARGET,
        "{}",
        logs::command_error_line(&invocation.sender, &invocation.content, &invocation.room_id, kind, message)
    );
}

/// Path of the rotated file `file` for `date`.
pub fn rotated_path(log_dir: &Path, file: &str, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{file}.{}", date.format("%Y-%m-%d")))
}

/// Lines written to `file` on `date`. A missing file counts as empty.
pub async fn log_line_count(log_dir: &Path, file: &str, date: NaiveDate) -> usize {
    let Ok(f) = tokio::fs::File::open(rotated_path(log_dir, file, date)).await else {
        return 0;
    };
    let mut lines = BufReader::new(f).lines();
    let mut count = 0;
    while let Ok(Some(_)) = lines.next_line().await {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    #[test]
    fn test_rotated_path_naming() {
        let path = rotated_path(Path::new("data/logs"), USAGE_LOG, date());
        assert_eq!(path, Path::new("data/logs/usage.log.2025-03-09"));
    }

    #[tokio::test]
    async fn test_log_line_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(rotated_path(dir.path(), USAGE_LOG, date()), "one\ntwo\nthree\n").unwrap();

        assert_eq!(log_line_count(dir.path(), USAGE_LOG, date()).await, 3);
        assert_eq!(log_line_count(dir.path(), ERRORS_LOG, date()).await, 0);
        assert_eq!(log_line_count(dir.path(), USAGE_LOG, date().succ_opt().unwrap()).await, 0);
    }

    /// Lines of every rotated file of `file` in `dir`.
    fn read_log(dir: &Path, file: &str) -> Vec<String> {
        let prefix = format!("{file}.");
        let mut lines = Vec::new();
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            if name.starts_with(&prefix) {
                lines.extend(fs::read_to_string(&path).unwrap().lines().map(str::to_string));
            }
        }
        lines
    }

    #[test]
    fn test_lines_reach_their_files() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = Invocation {
            sender: "@a:x".into(),
            sender_name: "a".into(),
            room_id: "!r:x".into(),
            event_id: None,
            content: "$roll 6".into(),
            command: "roll".into(),
            args: vec!["6".into()],
        };

        let (subscriber, guards) = subscriber(dir.path()).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            usage(&invocation, "rolled");
            command_error(&invocation, "BadArgument", "not a number");
            tracing::info!("plain event");
        });
        drop(guards);

        let usage_lines = read_log(dir.path(), USAGE_LOG);
        assert_eq!(usage_lines.len(), 1);
        assert!(usage_lines[0].contains("rolled"));

        let error_lines = read_log(dir.path(), ERRORS_LOG);
        assert_eq!(error_lines.len(), 1);
        assert!(error_lines[0].contains("BadArgument: not a number"));

        let all_lines = read_log(dir.path(), ALL_LOG);
        assert_eq!(all_lines.len(), 3);
        assert!(all_lines.iter().any(|l| l.contains("plain event")));
        assert!(!usage_lines.iter().chain(&error_lines).any(|l| l.contains("plain event")));
    }
}
