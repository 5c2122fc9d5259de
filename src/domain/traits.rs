//! # Domain Traits
//!
//! Abstract interfaces over the chat service.
//! `ChatProvider` is scoped to the room a command came from, `BotClient`
//! to the logged-in account as a whole.

use crate::domain::embed::Embed;
use crate::domain::types::{Activity, MemberDetails, RoomDetails};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Abstract interface for one chat room (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a plain markdown message, returns its event ID
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a rich message, optionally as a reply to another event
    async fn send_embed(&self, embed: &Embed, reply_to: Option<&str>) -> Result<String, String>;

    /// Upload a local file
    async fn send_file(&self, path: &Path) -> Result<String, String>;

    /// React to an event with an emoji key
    async fn react(&self, event_id: &str, key: &str) -> Result<(), String>;

    /// Metadata about the current room
    async fn room_details(&self) -> Result<RoomDetails, String>;

    /// Look up a member of the current room
    async fn member(&self, user_id: &str) -> Result<Option<MemberDetails>, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Abstract interface for the bot's account on the chat service
#[async_trait]
pub trait BotClient: Send + Sync {
    /// The bot's own user ID
    fn user_id(&self) -> String;

    /// Round-trip time of a lightweight request to the server
    async fn latency(&self) -> Result<Duration, String>;

    /// Every room the bot has joined
    async fn joined_rooms(&self) -> Vec<RoomDetails>;

    async fn set_presence(&self, activity: &Activity) -> Result<(), String>;

    /// Send a rich message to a room other than the current one
    async fn send_embed_to(&self, room_id: &str, embed: &Embed) -> Result<(), String>;

    /// Send a direct message, opening a DM room if needed
    async fn direct_message(&self, user_id: &str, content: &str) -> Result<(), String>;

    /// Accept an invite
    async fn join_room(&self, room_id: &str) -> Result<(), String>;

    async fn leave_room(&self, room_id: &str) -> Result<(), String>;
}
