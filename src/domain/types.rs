//! # Domain Types
//!
//! Common data structures passed between the chat adapter and the bot logic.

use std::fmt;

/// A text message as received from the chat service.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub event_id: Option<String>,
    pub sender: String,
    pub sender_name: String,
    pub body: String,
}

/// A parsed command invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub sender: String,
    /// Display name, falls back to the user ID.
    pub sender_name: String,
    pub room_id: String,
    pub event_id: Option<String>,
    /// Full message text as sent.
    pub content: String,
    /// Command token as typed, without prefix.
    pub command: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Splits `body` into command and arguments. `None` when the prefix is
    /// missing or nothing follows it.
    pub fn parse(prefix: &str, message: &IncomingMessage, room_id: &str) -> Option<Self> {
        let rest = message.body.trim().strip_prefix(prefix)?;
        let mut tokens = rest.split_whitespace();
        let command = tokens.next()?.to_string();
        if rest.starts_with(char::is_whitespace) {
            return None;
        }

        Some(Self {
            sender: message.sender.clone(),
            sender_name: message.sender_name.clone(),
            room_id: room_id.to_string(),
            event_id: message.event_id.clone(),
            content: message.body.clone(),
            command,
            args: tokens.map(str::to_string).collect(),
        })
    }

    /// Arguments joined back together.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }

    /// `Requested by name (id)` footer text.
    pub fn footer(&self) -> String {
        format!("Requested by {} ({})", self.sender_name, self.sender)
    }

    pub fn author_mention(&self) -> String {
        mention(&self.sender)
    }
}

/// Markdown pill linking to a user.
pub fn mention(user_id: &str) -> String {
    format!("[{user_id}](https://matrix.to/#/{user_id})")
}

/// Details about one room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomDetails {
    pub room_id: String,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub alias: Option<String>,
    pub joined_members: u64,
    pub invited_members: u64,
    pub avatar_url: Option<String>,
    pub is_direct: bool,
}

impl RoomDetails {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.alias.as_deref())
            .unwrap_or(&self.room_id)
    }
}

/// Details about one room member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberDetails {
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub membership: String,
}

impl MemberDetails {
    /// The display name, else the localpart of the user ID.
    pub fn username(&self) -> &str {
        if let Some(name) = self.display_name.as_deref() {
            return name;
        }
        let localpart = self.user_id.trim_start_matches('@');
        localpart.split(':').next().unwrap_or(localpart)
    }

    pub fn server_name(&self) -> &str {
        self.user_id.split_once(':').map(|(_, s)| s).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Playing,
    Watching,
    Streaming,
    Listening,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Playing,
        ActivityKind::Watching,
        ActivityKind::Streaming,
        ActivityKind::Listening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Playing => "playing",
            ActivityKind::Watching => "watching",
            ActivityKind::Streaming => "streaming",
            ActivityKind::Listening => "listening to",
        }
    }
}

/// Presence status shown next to the bot's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: String,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ActivityKind::Playing => "Playing",
            ActivityKind::Watching => "Watching",
            ActivityKind::Streaming => "Streaming",
            ActivityKind::Listening => "Listening to",
        };
        write!(f, "{verb} {}", self.text)
    }
}
