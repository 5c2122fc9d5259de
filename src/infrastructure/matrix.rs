//! # Matrix Service Adapter
//!
//! Implements `ChatProvider` for a single Matrix room and `BotClient` for the
//! logged-in account, using `matrix_sdk`.
//! This is the only module that talks to the SDK; the bot's logic only sees
//! the traits from `domain::traits`.

use crate::domain::embed::Embed;
use crate::domain::traits::{BotClient, ChatProvider};
use crate::domain::types::{Activity, IncomingMessage, MemberDetails, RoomDetails};
use anyhow::Result;
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::attachment::AttachmentConfig;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::api::client::presence::set_presence;
use matrix_sdk::ruma::events::reaction::ReactionEventContent;
use matrix_sdk::ruma::events::relation::{Annotation, InReplyTo};
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, Relation, RoomMessageEventContent,
};
use matrix_sdk::ruma::presence::PresenceState;
use matrix_sdk::ruma::{EventId, RoomId, UserId};
use std::path::Path;
use std::time::{Duration, Instant};

/// Metadata of a room as known from the local sync state.
pub fn describe_room(room: &Room) -> RoomDetails {
    RoomDetails {
        room_id: room.room_id().to_string(),
        name: room.name(),
        topic: room.topic(),
        alias: room.canonical_alias().map(|a| a.to_string()),
        joined_members: room.joined_members_count(),
        invited_members: room.invited_members_count(),
        avatar_url: room.avatar_url().map(|u| u.to_string()),
        is_direct: room.direct_targets_length() > 0,
    }
}

/// Turns a text message into the bot's own message type. Other message
/// types (images, notices, ...) are never commands.
pub async fn incoming_message(ev: &OriginalSyncRoomMessageEvent, room: &Room) -> Option<IncomingMessage> {
    let MessageType::Text(text) = &ev.content.msgtype else {
        return None;
    };
    let sender_name = match room.get_member_no_sync(&ev.sender).await {
        Ok(Some(member)) => member.name().to_string(),
        _ => ev.sender.localpart().to_string(),
    };
    Some(IncomingMessage {
        event_id: Some(ev.event_id.to_string()),
        sender: ev.sender.to_string(),
        sender_name,
        body: text.body.clone(),
    })
}

/// Content type for an upload, guessed from the file extension.
fn content_type(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("mp4") => "video/mp4".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("txt") => mime::TEXT_PLAIN,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }

    async fn send_markdown(&self, markdown: String, reply_to: Option<&str>) -> Result<String> {
        let mut content = RoomMessageEventContent::text_markdown(markdown);
        if let Some(event_id) = reply_to {
            content.relates_to = Some(Relation::Reply {
                in_reply_to: InReplyTo::new(EventId::parse(event_id)?),
            });
        }
        let resp = self.room.send(content).await?;
        Ok(resp.event_id.to_string())
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let resp = self
            .room
            .send_attachment(filename, &content_type(path), data, AttachmentConfig::new())
            .await?;
        Ok(resp.event_id.to_string())
    }

    async fn annotate(&self, event_id: &str, key: &str) -> Result<()> {
        let content = ReactionEventContent::new(Annotation::new(EventId::parse(event_id)?, key.to_string()));
        self.room.send(content).await?;
        Ok(())
    }

    async fn lookup_member(&self, user_id: &str) -> Result<Option<MemberDetails>> {
        let Ok(user_id) = UserId::parse(user_id) else {
            return Ok(None);
        };
        let member = self.room.get_member(&user_id).await?;
        Ok(member.map(|m| MemberDetails {
            user_id: m.user_id().to_string(),
            display_name: m.display_name().map(str::to_string),
            avatar_url: m.avatar_url().map(|u| u.to_string()),
            membership: m.membership().as_str().to_string(),
        }))
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.send_markdown(content.to_string(), None)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_embed(&self, embed: &Embed, reply_to: Option<&str>) -> Result<String, String> {
        tracing::debug!("Bot sending embed '{}' to {}", embed.title, self.room_id());
        self.send_markdown(embed.to_markdown(), reply_to)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_file(&self, path: &Path) -> Result<String, String> {
        self.upload(path).await.map_err(|e| e.to_string())
    }

    async fn react(&self, event_id: &str, key: &str) -> Result<(), String> {
        self.annotate(event_id, key).await.map_err(|e| e.to_string())
    }

    async fn room_details(&self) -> Result<RoomDetails, String> {
        Ok(describe_room(&self.room))
    }

    async fn member(&self, user_id: &str) -> Result<Option<MemberDetails>, String> {
        self.lookup_member(user_id).await.map_err(|e| e.to_string())
    }
}

#[derive(Clone)]
pub struct MatrixClient {
    client: Client,
}

impl MatrixClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn room(&self, room_id: &str) -> Result<Room> {
        let room_id = RoomId::parse(room_id)?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| anyhow::anyhow!("Not a known room: {room_id}"))
    }

    async fn presence(&self, activity: &Activity) -> Result<()> {
        let user_id = self
            .client
            .user_id()
            .ok_or_else(|| anyhow::anyhow!("Not logged in"))?
            .to_owned();
        let mut request = set_presence::v3::Request::new(user_id, PresenceState::Online);
        request.status_msg = Some(activity.to_string());
        self.client.send(request).await?;
        Ok(())
    }

    async fn dm(&self, user_id: &str, content: &str) -> Result<()> {
        let user_id = UserId::parse(user_id)?;
        let room = match self.client.get_dm_room(&user_id) {
            Some(room) => room,
            None => self.client.create_dm(&user_id).await?,
        };
        room.send(RoomMessageEventContent::text_markdown(content)).await?;
        Ok(())
    }
}

#[async_trait]
impl BotClient for MatrixClient {
    fn user_id(&self) -> String {
        self.client
            .user_id()
            .map(|u| u.to_string())
            .unwrap_or_default()
    }

    async fn latency(&self) -> Result<Duration, String> {
        let start = Instant::now();
        self.client.whoami().await.map_err(|e| e.to_string())?;
        Ok(start.elapsed())
    }

    async fn joined_rooms(&self) -> Vec<RoomDetails> {
        self.client.joined_rooms().iter().map(describe_room).collect()
    }

    async fn set_presence(&self, activity: &Activity) -> Result<(), String> {
        self.presence(activity).await.map_err(|e| e.to_string())
    }

    async fn send_embed_to(&self, room_id: &str, embed: &Embed) -> Result<(), String> {
        let room = self.room(room_id).map_err(|e| e.to_string())?;
        MatrixService::new(room)
            .send_embed(embed, None)
            .await
            .map(|_| ())
    }

    async fn direct_message(&self, user_id: &str, content: &str) -> Result<(), String> {
        self.dm(user_id, content).await.map_err(|e| e.to_string())
    }

    async fn join_room(&self, room_id: &str) -> Result<(), String> {
        let room_id = RoomId::parse(room_id).map_err(|e| e.to_string())?;
        self.client
            .join_room_by_id(&room_id)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn leave_room(&self, room_id: &str) -> Result<(), String> {
        let room = self.room(room_id).map_err(|e| e.to_string())?;
        room.leave().await.map_err(|e| e.to_string())
    }
}
