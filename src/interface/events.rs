//! # Event Handlers
//!
//! What the bot does when it comes online, is invited somewhere or sees a
//! room message. `main` adapts the SDK's events to these calls.

use crate::application::router::CommandRouter;
use crate::application::state::BotState;
use crate::application::uptime::format_timestamp;
use crate::domain::embed::{Color, Embed};
use crate::domain::traits::{BotClient, ChatProvider};
use crate::domain::types::{IncomingMessage, mention};
use crate::strings::{logs, messages};
use chrono::{DateTime, Local, Utc};

/// Announces the bot in the status room.
pub async fn on_ready(state: &BotState, client: &dyn BotClient) {
    tracing::info!("{}", logs::logged_in(&client.user_id()));

    let Some(room) = state.config.bot.status_room.as_deref() else {
        tracing::info!("{}", logs::NO_STATUS_ROOM);
        return;
    };

    let started = state.started_at.with_timezone(&Local);
    let embed = Embed::new(messages::ONLINE_TITLE, format_timestamp(&started), Color::Green);
    if let Err(e) = client.send_embed_to(room, &embed).await {
        tracing::error!("{}", logs::status_room_fail(room, &e));
    }
}

/// Accepts an invite. Rooms outside the allow-list get an explanation
/// and are left straight away.
///
/// `chat` must address the invited room.
pub async fn on_invite(state: &BotState, client: &dyn BotClient, chat: &dyn ChatProvider, inviter: &str) {
    let room_id = chat.room_id();
    tracing::info!("{}", logs::invite_received(&room_id, inviter));

    if let Err(e) = client.join_room(&room_id).await {
        tracing::error!("{}", logs::join_invite_fail(&room_id, &e));
        return;
    }

    if state.config.bot.is_room_allowed(&room_id) {
        tracing::info!("{}", logs::joined_room(&room_id));
        return;
    }

    if let Err(e) = chat.send_message(&messages::disallowed_room(&mention(inviter))).await {
        tracing::warn!("Failed to explain leaving {}: {}", room_id, e);
    }
    match client.leave_room(&room_id).await {
        Ok(()) => tracing::info!("{}", logs::left_disallowed_room(&room_id)),
        Err(e) => tracing::error!("{}", logs::leave_room_fail(&room_id, &e)),
    }
}

/// Hands a room message to the router. Messages sent before the bot started
/// are replays from the initial sync and are skipped.
pub async fn on_message(
    router: &CommandRouter,
    state: &BotState,
    chat: &dyn ChatProvider,
    client: &dyn BotClient,
    message: IncomingMessage,
    sent_at: DateTime<Utc>,
) {
    if sent_at < state.started_at {
        return;
    }
    tracing::debug!("{}", logs::message_received(&message.sender, &chat.room_id(), &message.body));
    router.route(chat, client, message).await;
}
