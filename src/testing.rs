//! In-memory chat room and client for handler tests.

use crate::application::router::CommandRouter;
use crate::application::state::BotState;
use crate::domain::config::AppConfig;
use crate::domain::embed::Embed;
use crate::domain::traits::{BotClient, ChatProvider};
use crate::domain::types::{Activity, IncomingMessage, MemberDetails, RoomDetails};
use crate::interface::commands::build_registry;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BOT_USER: &str = "@dotzbot:example.org";
pub const OWNER: &str = "@dotz:example.org";
pub const STRANGER: &str = "@alice:example.org";
pub const ROOM: &str = "!room:example.org";
pub const STATUS_ROOM: &str = "!status:example.org";

pub fn test_config() -> AppConfig {
    AppConfig::parse(
        r#"
services:
  matrix:
    homeserver: https://matrix.example.org
    username: dotzbot
bot:
  owner: "@dotz:example.org"
  status_room: "!status:example.org"
  allowed_rooms: ["!room:example.org", "!status:example.org"]
"#,
    )
    .unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message(String),
    Embed { embed: Embed, reply_to: Option<String> },
    File(PathBuf),
    Reaction { event_id: String, key: String },
}

pub struct MockChat {
    pub details: RoomDetails,
    pub members: HashMap<String, MemberDetails>,
    sent: Mutex<Vec<Sent>>,
    counter: AtomicUsize,
}

impl MockChat {
    pub fn new(details: RoomDetails) -> Self {
        Self {
            details,
            members: HashMap::new(),
            sent: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn room() -> Self {
        Self::new(RoomDetails {
            room_id: ROOM.into(),
            name: Some("dotz's corner".into()),
            topic: Some("games and memes".into()),
            alias: Some("#corner:example.org".into()),
            joined_members: 3,
            invited_members: 1,
            avatar_url: None,
            is_direct: false,
        })
    }

    pub fn with_member(mut self, user_id: &str, display_name: &str) -> Self {
        self.members.insert(
            user_id.to_string(),
            MemberDetails {
                user_id: user_id.to_string(),
                display_name: Some(display_name.to_string()),
                avatar_url: Some("mxc://example.org/avatar".into()),
                membership: "join".into(),
            },
        );
        self
    }

    fn record(&self, item: Sent) -> String {
        self.sent.lock().unwrap().push(item);
        format!("$event{}", self.counter.fetch_add(1, Ordering::SeqCst))
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn embeds(&self) -> Vec<Embed> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Embed { embed, .. } => Some(embed),
                _ => None,
            })
            .collect()
    }

    pub fn last_embed(&self) -> Option<Embed> {
        self.embeds().pop()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::File(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn reactions(&self) -> Vec<(String, String)> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reaction { event_id, key } => Some((event_id, key)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        Ok(self.record(Sent::Message(content.to_string())))
    }

    async fn send_embed(&self, embed: &Embed, reply_to: Option<&str>) -> Result<String, String> {
        Ok(self.record(Sent::Embed {
            embed: embed.clone(),
            reply_to: reply_to.map(str::to_string),
        }))
    }

    async fn send_file(&self, path: &Path) -> Result<String, String> {
        Ok(self.record(Sent::File(path.to_path_buf())))
    }

    async fn react(&self, event_id: &str, key: &str) -> Result<(), String> {
        self.record(Sent::Reaction {
            event_id: event_id.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    async fn room_details(&self) -> Result<RoomDetails, String> {
        Ok(self.details.clone())
    }

    async fn member(&self, user_id: &str) -> Result<Option<MemberDetails>, String> {
        Ok(self.members.get(user_id).cloned())
    }

    fn room_id(&self) -> String {
        self.details.room_id.clone()
    }
}

#[derive(Default)]
pub struct MockClient {
    pub rooms: Vec<RoomDetails>,
    pub fail_direct_messages: AtomicBool,
    pub presences: Mutex<Vec<Activity>>,
    pub room_embeds: Mutex<Vec<(String, Embed)>>,
    pub direct_messages: Mutex<Vec<(String, String)>>,
    pub joined: Mutex<Vec<String>>,
    pub left_rooms: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            rooms: vec![
                MockChat::room().details,
                RoomDetails {
                    room_id: STATUS_ROOM.into(),
                    name: Some("bot-status".into()),
                    joined_members: 2,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }
}

#[async_trait]
impl BotClient for MockClient {
    fn user_id(&self) -> String {
        BOT_USER.to_string()
    }

    async fn latency(&self) -> Result<Duration, String> {
        Ok(Duration::from_millis(42))
    }

    async fn joined_rooms(&self) -> Vec<RoomDetails> {
        self.rooms.clone()
    }

    async fn set_presence(&self, activity: &Activity) -> Result<(), String> {
        self.presences.lock().unwrap().push(activity.clone());
        Ok(())
    }

    async fn send_embed_to(&self, room_id: &str, embed: &Embed) -> Result<(), String> {
        self.room_embeds
            .lock()
            .unwrap()
            .push((room_id.to_string(), embed.clone()));
        Ok(())
    }

    async fn direct_message(&self, user_id: &str, content: &str) -> Result<(), String> {
        if self.fail_direct_messages.load(Ordering::SeqCst) {
            return Err("M_FORBIDDEN".to_string());
        }
        self.direct_messages
            .lock()
            .unwrap()
            .push((user_id.to_string(), content.to_string()));
        Ok(())
    }

    async fn join_room(&self, room_id: &str) -> Result<(), String> {
        self.joined.lock().unwrap().push(room_id.to_string());
        Ok(())
    }

    async fn leave_room(&self, room_id: &str) -> Result<(), String> {
        self.left_rooms.lock().unwrap().push(room_id.to_string());
        Ok(())
    }
}

/// A router wired to a mock room and client.
pub struct Harness {
    pub state: Arc<BotState>,
    pub router: CommandRouter,
    pub chat: MockChat,
    pub client: MockClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_chat(config, MockChat::room())
    }

    pub fn with_chat(config: AppConfig, chat: MockChat) -> Self {
        let state = Arc::new(BotState::new(config));
        let registry = Arc::new(build_registry().unwrap());
        Self {
            router: CommandRouter::new(state.clone(), registry),
            state,
            chat,
            client: MockClient::new(),
        }
    }

    pub async fn send(&self, sender: &str, body: &str) {
        let message = IncomingMessage {
            event_id: Some("$invocation".into()),
            sender: sender.to_string(),
            sender_name: sender.trim_start_matches('@').split(':').next().unwrap_or(sender).to_string(),
            body: body.to_string(),
        };
        self.router.route(&self.chat, &self.client, message).await;
    }
}
