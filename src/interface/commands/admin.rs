//! # Admin Commands
//!
//! Hidden commands for the bot's owner. The router checks ownership before
//! any of these run.

use crate::application::registry::{CommandContext, CommandRegistry, CommandSpec};
use crate::application::uptime::format_timestamp;
use crate::domain::embed::{Color, Embed};
use crate::strings::{logs, messages};
use anyhow::Result;
use chrono::Local;
use futures::FutureExt;
use futures::future::BoxFuture;

pub fn register(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(CommandSpec::owner_only(
        "shutdown",
        &["die", "de-exist"],
        "Shuts down the bot (owner only)",
        shutdown,
    ))?;
    registry.register(CommandSpec::owner_only(
        "serverlist",
        &["servers"],
        "List all rooms the bot is in (owner only)",
        serverlist,
    ))?;
    registry.register(CommandSpec::owner_only(
        "stats",
        &[],
        "Show usage statistics (owner only)",
        stats,
    ))?;
    Ok(())
}

fn shutdown<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        if let Some(event_id) = ctx.invocation.event_id.as_deref()
            && let Err(e) = ctx.chat.react(event_id, messages::SHUTDOWN_REACTION).await
        {
            tracing::warn!("Failed to react to shutdown request: {}", e);
        }

        let uptime = ctx.state.uptime();
        let embed = Embed::new(messages::OFFLINE_TITLE, format_timestamp(&Local::now()), Color::Red)
            .field("", messages::uptime_field(&uptime), true);

        match ctx.bot().status_room.as_deref() {
            Some(room) => {
                if let Err(e) = ctx.client.send_embed_to(room, &embed).await {
                    tracing::warn!("{}", logs::status_room_fail(room, &e));
                }
            }
            None => ctx.reply(embed).await?,
        }

        ctx.usage("used the shutdown command");
        tracing::info!("{}", logs::uptime_at_shutdown(&uptime));
        ctx.state.request_shutdown();
        Ok(())
    }
    .boxed()
}

fn serverlist<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let rooms = ctx.client.joined_rooms().await;

        let mut embed = Embed::new(
            messages::SERVER_LIST_TITLE,
            messages::server_list_description(rooms.len()),
            Color::Gold,
        );
        for room in &rooms {
            embed = embed.field(
                room.display_name(),
                messages::server_entry(&room.room_id, room.joined_members),
                false,
            );
        }

        ctx.reply(embed.requested_by(ctx.invocation)).await?;
        ctx.usage(&format!("used the serverlist command ({} rooms)", rooms.len()));
        Ok(())
    }
    .boxed()
}

fn stats<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let report = ctx.state.stats.snapshot();

        let embed = Embed::new(messages::STATS_TITLE, "", Color::Gold)
            .field(
                "Commands",
                messages::stats_pair(report.total_commands, report.window_commands),
                true,
            )
            .field(
                "Users",
                messages::stats_pair(report.session_users, report.window_users),
                true,
            )
            .field(
                "Errors",
                messages::stats_pair(report.total_errors, report.window_errors),
                true,
            )
            .requested_by(ctx.invocation);

        ctx.reply(embed).await?;
        ctx.usage(&format!("used the stats command ({report})"));
        Ok(())
    }
    .boxed()
}
