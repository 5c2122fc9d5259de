//! # Configuration
//!
//! Loads and validates the bot's configuration file (`data/config.yaml`).
//! Secrets and per-deployment identifiers may also come from the environment
//! through the command line arguments, which take precedence over the file.

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Configuration for the connected chat service.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub homeserver: String,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Behaviour of the bot itself.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Matrix user ID of the bot's administrator.
    #[serde(default)]
    pub owner: Option<String>,
    /// Room that receives the online/offline announcements.
    #[serde(default)]
    pub status_room: Option<String>,
    /// Rooms the bot may stay in. Empty means every room.
    #[serde(default)]
    pub allowed_rooms: Vec<String>,
    #[serde(default = "default_meme_dir")]
    pub meme_dir: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// GitHub `owner/name` of the bot's source repository.
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default = "default_presence_interval")]
    pub presence_interval_secs: u64,
    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,
    #[serde(default)]
    pub reminder: ReminderConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            owner: None,
            status_room: None,
            allowed_rooms: Vec::new(),
            meme_dir: default_meme_dir(),
            log_dir: default_log_dir(),
            repository: None,
            presence_interval_secs: default_presence_interval(),
            stats_interval_secs: default_stats_interval(),
            reminder: ReminderConfig::default(),
        }
    }
}

/// Daily direct-message reminder.
#[derive(Debug, Deserialize, Clone)]
pub struct ReminderConfig {
    #[serde(default)]
    pub user: Option<String>,
    /// Local wall-clock time, `HH:MM`.
    #[serde(default = "default_reminder_time")]
    pub time: String,
    #[serde(default = "default_reminder_message")]
    pub message: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            user: None,
            time: default_reminder_time(),
            message: default_reminder_message(),
        }
    }
}

impl ReminderConfig {
    pub fn parsed_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .with_context(|| format!("Invalid reminder time '{}', expected HH:MM", self.time))
    }
}

fn default_prefix() -> String {
    "$".to_string()
}
fn default_meme_dir() -> PathBuf {
    PathBuf::from("memefolder")
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("data/logs")
}
fn default_presence_interval() -> u64 {
    300
}
fn default_stats_interval() -> u64 {
    30 * 60
}
fn default_reminder_time() -> String {
    "00:30".to_string()
}
fn default_reminder_message() -> String {
    "Reminder to do your QOTD!".to_string()
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub password: Option<String>,
    pub owner: Option<String>,
    pub reminder_user: Option<String>,
}

impl AppConfig {
    /// Reads, parses and validates the YAML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bot.prefix.trim().is_empty() {
            bail!("bot.prefix must not be empty");
        }
        if self.bot.presence_interval_secs == 0 || self.bot.stats_interval_secs == 0 {
            bail!("bot intervals must be greater than zero");
        }
        self.bot.reminder.parsed_time()?;
        Ok(())
    }

    /// Non-empty override values replace the file's values.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        if let Some(password) = non_empty(overrides.password) {
            self.services.matrix.password = Some(password);
        }
        if let Some(owner) = non_empty(overrides.owner) {
            self.bot.owner = Some(owner);
        }
        if let Some(user) = non_empty(overrides.reminder_user) {
            self.bot.reminder.user = Some(user);
        }
    }

    /// The login secret. Its absence is fatal at startup.
    pub fn password(&self) -> Result<&str> {
        match self.services.matrix.password.as_deref() {
            Some(p) if !p.is_empty() => Ok(p),
            _ => bail!("No password configured: set DOTZBOT_PASSWORD or services.matrix.password"),
        }
    }
}

impl BotConfig {
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(user_id))
    }

    pub fn is_room_allowed(&self, room_id: &str) -> bool {
        self.allowed_rooms.is_empty() || self.allowed_rooms.iter().any(|r| r == room_id)
    }
}
