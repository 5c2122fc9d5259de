#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Wires the bot together:
//! - Domain: configuration and shared types
//! - Infrastructure: Matrix and GitHub adapters
//! - Application: router, registry, logging, background tasks
//! - Interface: command and event handlers

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::OriginalSyncRoomMessageEvent,
    },
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::router::CommandRouter;
use crate::application::scheduler::Reminder;
use crate::application::state::BotState;
use crate::application::{logging, presence, scheduler, stats};
use crate::domain::config::{AppConfig, Overrides};
use crate::domain::traits::BotClient;
use crate::infrastructure::matrix::{MatrixClient, MatrixService, incoming_message};
use crate::interface::{commands, events};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(name = "dotzbot", version, about = "A small Matrix bot with games and utilities")]
struct Args {
    /// Path of the YAML configuration file.
    #[arg(long, env = "DOTZBOT_CONFIG", default_value = "data/config.yaml")]
    config: PathBuf,

    /// Login password, overrides `services.matrix.password`.
    #[arg(long, env = "DOTZBOT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Matrix ID of the bot owner.
    #[arg(long, env = "DOTZBOT_OWNER")]
    owner: Option<String>,

    /// Matrix ID that receives the daily reminder.
    #[arg(long, env = "DOTZBOT_REMINDER_USER")]
    reminder_user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // 1. Configuration
    let mut config = AppConfig::load(&args.config)?;
    config.apply_overrides(Overrides {
        password: args.password,
        owner: args.owner,
        reminder_user: args.reminder_user,
    });

    // 2. Logging
    let _log_guards = logging::init(&config.bot.log_dir)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!("{}", logs::config_loaded(&args.config.display().to_string()));

    // 3. Matrix login
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(&matrix.username, config.password()?)
        .initial_device_display_name("dotzbot")
        .send()
        .await
        .context("Failed to log in")?;

    if let Some(name) = matrix.display_name.as_deref() {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name)).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 4. Application components
    let state = Arc::new(BotState::new(config));
    let registry = Arc::new(commands::build_registry()?);
    let router = Arc::new(CommandRouter::new(state.clone(), registry));
    let bot_client: Arc<dyn BotClient> = Arc::new(MatrixClient::new(client.clone()));

    // 5. Initial sync, so rooms are known before announcing
    let response = client
        .sync_once(SyncSettings::default())
        .await
        .context("Initial sync failed")?;
    events::on_ready(&state, bot_client.as_ref()).await;

    // 6. Event handlers
    let message_state = state.clone();
    let message_router = router.clone();
    let message_client = bot_client.clone();
    client.add_event_handler(move |ev: OriginalSyncRoomMessageEvent, room: Room| {
        let state = message_state.clone();
        let router = message_router.clone();
        let client = message_client.clone();
        async move {
            let Some(message) = incoming_message(&ev, &room).await else {
                return;
            };
            let sent_at = ev
                .origin_server_ts
                .to_system_time()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(Utc::now);
            let chat = MatrixService::new(room);
            events::on_message(&router, &state, &chat, client.as_ref(), message, sent_at).await;
        }
    });

    let invite_state = state.clone();
    let invite_client = bot_client.clone();
    client.add_event_handler(move |ev: StrippedRoomMemberEvent, room: Room| {
        let state = invite_state.clone();
        let client = invite_client.clone();
        async move {
            if ev.content.membership != MembershipState::Invite {
                return;
            }
            if ev.state_key.as_str() != client.user_id() {
                return;
            }
            let chat = MatrixService::new(room);
            events::on_invite(&state, client.as_ref(), &chat, ev.sender.as_str()).await;
        }
    });

    // 7. Background tasks
    let bot = &state.config.bot;
    tokio::spawn(presence::run_rotation(
        bot_client.clone(),
        Duration::from_secs(bot.presence_interval_secs),
        state.subscribe_shutdown(),
    ));
    tokio::spawn(stats::run_reporter(
        state.stats.clone(),
        Duration::from_secs(bot.stats_interval_secs),
        state.subscribe_shutdown(),
    ));
    match bot.reminder.user.clone() {
        Some(user) => {
            let reminder = Reminder {
                user,
                at: bot.reminder.parsed_time()?,
                message: bot.reminder.message.clone(),
            };
            tokio::spawn(scheduler::run_daily_reminder(
                bot_client.clone(),
                reminder,
                state.subscribe_shutdown(),
            ));
        }
        None => tracing::info!("{}", logs::NO_REMINDER_USER),
    }

    // 8. Sync until shutdown
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let mut shutdown = state.subscribe_shutdown();
    let settings = SyncSettings::default().token(response.next_batch);
    tokio::select! {
        result = client.sync(settings) => {
            if let Err(e) = result {
                tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
            }
        }
        _ = shutdown.wait_for(|stopping| *stopping) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            }
            tracing::info!("{}", logs::uptime_at_shutdown(&state.uptime()));
        }
    }

    state.request_shutdown();
    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}
