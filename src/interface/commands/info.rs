//! # Info Commands
//!
//! Help listing, latency, uptime and metadata about the bot, users and rooms.

use crate::application::logging;
use crate::application::registry::{Category, CommandContext, CommandRegistry, CommandSpec};
use crate::domain::embed::{Color, Embed};
use crate::domain::types::mention;
use crate::infrastructure::github;
use crate::strings::{logs, messages};
use anyhow::{Result, anyhow};
use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use std::sync::LazyLock;

static USER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<?(?:https://matrix\.to/#/)?(@[^:\s/]+:[^\s/>?]+)>?$").unwrap()
});

pub fn register(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(CommandSpec::public("help", &["?"], "Shows this list!", Category::Info, help))?;
    registry.register(CommandSpec::public(
        "ping",
        &["latency", "lag", "ms"],
        "Show the bot's latency",
        Category::Info,
        ping,
    ))?;
    registry.register(CommandSpec::public(
        "uptime",
        &["lifetime", "upkeep"],
        "Show how long the bot has been running",
        Category::Info,
        uptime,
    ))?;
    registry.register(CommandSpec::public(
        "botinfo",
        &["bot", "about"],
        "General info about the bot",
        Category::Info,
        botinfo,
    ))?;
    registry.register(CommandSpec::public(
        "userinfo",
        &["user", "checkuser"],
        "Get info about a User",
        Category::Info,
        userinfo,
    ))?;
    registry.register(CommandSpec::public(
        "serverinfo",
        &["server", "checkserver"],
        "Get info about the current room",
        Category::Info,
        serverinfo,
    ))?;
    Ok(())
}

/// Extracts a user ID from `@user:server`, a matrix.to link or either of
/// those wrapped in angle brackets.
pub fn parse_user_reference(input: &str) -> Option<String> {
    USER_REFERENCE
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn help<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let prefix = &ctx.bot().prefix;
        let mut embed = Embed::new(messages::HELP_TITLE, "", Color::Gold);

        for spec in ctx.registry.visible_for(ctx.is_owner()) {
            let mut value = if spec.description.is_empty() {
                messages::NO_DESCRIPTION.to_string()
            } else {
                spec.description.to_string()
            };
            if !spec.aliases.is_empty() {
                value.push('\n');
                value.push_str(&messages::help_aliases(&spec.aliases.join(", ")));
            }
            embed = embed.field(format!("{prefix}{}", spec.name), value, false);
        }

        ctx.reply(embed.requested_by(ctx.invocation)).await?;
        ctx.usage("used the help command");
        Ok(())
    }
    .boxed()
}

fn ping<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let latency = ctx.client.latency().await.map_err(|e| anyhow!(e))?;
        let ms = latency.as_millis();

        let embed = Embed::new(messages::PONG_TITLE, messages::latency(ms), Color::Gold)
            .requested_by(ctx.invocation);
        ctx.reply(embed).await?;
        ctx.usage(&format!("used the ping command ({ms}ms)"));
        Ok(())
    }
    .boxed()
}

fn uptime<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let uptime = ctx.state.uptime();
        let embed = Embed::new(messages::UPTIME_TITLE, messages::uptime_description(&uptime), Color::Gold)
            .requested_by(ctx.invocation);
        ctx.reply(embed).await?;
        ctx.usage(&format!("used the uptime command ({uptime})"));
        Ok(())
    }
    .boxed()
}

fn botinfo<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let bot = ctx.bot();

        let commit = match bot.repository.as_deref() {
            Some(repo) => match github::fetch_latest_commit(&ctx.state.http, repo).await {
                Ok(commit) => Some(commit),
                Err(e) => {
                    tracing::warn!("{}", logs::commit_fetch_fail(&format!("{e:#}")));
                    None
                }
            },
            None => None,
        };

        let repo_link = bot
            .repository
            .as_deref()
            .map(|repo| format!("[{repo}]({})", github::repository_url(repo)))
            .unwrap_or_else(|| messages::UNKNOWN.to_string());
        let (commit_link, commit_message) = match commit {
            Some(c) => (format!("[{}]({})", c.short_sha, c.url), c.message),
            None => (
                messages::COMMIT_FETCH_FAILED.to_string(),
                messages::COMMIT_FETCH_FAILED.to_string(),
            ),
        };

        let developer = bot
            .owner
            .as_deref()
            .map(mention)
            .unwrap_or_else(|| messages::UNKNOWN.to_string());
        let (visible, hidden) = ctx.registry.counts();
        let log_length =
            logging::log_line_count(&bot.log_dir, logging::USAGE_LOG, Utc::now().date_naive()).await;
        let rooms = ctx.client.joined_rooms().await.len();

        let embed = Embed::new(
            messages::BOT_NAME,
            messages::bot_info_description(&developer),
            Color::Gold,
        )
        .field("Open-Source Info", "", false)
        .field("GitHub Link", repo_link, true)
        .field("Latest Commit", commit_link, true)
        .field("Commit Message", commit_message, true)
        .field("Support", "", false)
        .field("Developer", developer.as_str(), true)
        .field("Software", "", false)
        .field("dotzbot version", env!("CARGO_PKG_VERSION"), true)
        .field("Platform", format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH), true)
        .field("Statistics", "", false)
        .field("Current Log Length", log_length.to_string(), true)
        .field("Room Count", rooms.to_string(), true)
        .field("Command Amount", messages::command_amount(visible + hidden, hidden), true)
        .requested_by(ctx.invocation);

        ctx.reply(embed).await?;
        ctx.usage("used the botinfo command");
        Ok(())
    }
    .boxed()
}

fn userinfo<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let inv = ctx.invocation;
        let Some(user_id) = inv.args.first().and_then(|a| parse_user_reference(a)) else {
            let embed = Embed::new(
                messages::userinfo_usage_title(&ctx.bot().prefix),
                messages::USERINFO_USAGE_DESC,
                Color::Red,
            )
            .requested_by(inv);
            ctx.reply(embed).await?;
            ctx.usage(&format!("failed to use userinfo ({})", inv.content));
            return Ok(());
        };

        let Some(member) = ctx.chat.member(&user_id).await.map_err(|e| anyhow!(e))? else {
            ctx.say(messages::USER_NOT_FOUND).await?;
            tracing::warn!("{} provided a user we couldn't find ({})", inv.sender, inv.content);
            return Ok(());
        };

        let bot_id = ctx.client.user_id();
        let description = if ctx.state.is_owner(&member.user_id) {
            messages::USER_IS_OWNER
        } else if member.user_id == bot_id {
            messages::USER_IS_BOT
        } else {
            ""
        };

        let mut embed = Embed::new(messages::USER_INFO_TITLE, description, Color::Green)
            .field("Username", member.username(), true)
            .field("User ID", member.user_id.as_str(), true)
            .field("Homeserver", member.server_name(), true)
            .field("Bot?", if member.user_id == bot_id { "Yes" } else { "No" }, true)
            .field("Membership", member.membership.as_str(), true);
        if let Some(avatar) = member.avatar_url.as_deref() {
            embed = embed.thumbnail(avatar);
        }

        ctx.reply(embed.requested_by(inv)).await?;
        ctx.usage(&format!("used {}", inv.content));
        Ok(())
    }
    .boxed()
}

fn serverinfo<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let inv = ctx.invocation;
        let room = ctx.chat.room_details().await.map_err(|e| anyhow!(e))?;

        let embed = if room.is_direct {
            Embed::new(messages::DM_TITLE, messages::DM_DESC, Color::Gold)
                .field("Room ID", room.room_id.as_str(), true)
                .field("Members", room.joined_members.to_string(), true)
                .field("Your Username", inv.sender_name.as_str(), true)
                .field("Your User ID", inv.sender.as_str(), true)
        } else {
            let mut embed = Embed::new(room.display_name(), "", Color::Green);
            if let Some(avatar) = room.avatar_url.as_deref() {
                embed = embed.thumbnail(avatar);
            }
            if let Some(topic) = room.topic.as_deref().filter(|t| !t.is_empty()) {
                embed = embed.field("Room Topic", topic, false);
            }
            embed
                .field("Room ID", room.room_id.as_str(), true)
                .field("Room Alias", room.alias.as_deref().unwrap_or("None"), true)
                .field("Member Count", room.joined_members.to_string(), true)
                .field("Invited Members", room.invited_members.to_string(), true)
        };

        ctx.reply(embed.requested_by(inv)).await?;
        ctx.usage(&format!("used the serverinfo command in {}", room.display_name()));
        Ok(())
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RoomDetails;
    use crate::testing::{BOT_USER, Harness, MockChat, OWNER, STRANGER, test_config};

    #[test]
    fn test_parse_user_reference() {
        assert_eq!(parse_user_reference("@bob:example.org").as_deref(), Some("@bob:example.org"));
        assert_eq!(
            parse_user_reference("https://matrix.to/#/@bob:example.org").as_deref(),
            Some("@bob:example.org")
        );
        assert_eq!(parse_user_reference("<@bob:example.org>").as_deref(), Some("@bob:example.org"));
        assert_eq!(parse_user_reference("bob"), None);
        assert_eq!(parse_user_reference("@bob"), None);
    }

    #[tokio::test]
    async fn test_help_hides_owner_commands_from_others() {
        let h = Harness::new();
        h.send(STRANGER, "$help").await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.title, "dotzbot's commands");
        assert!(embed.field_value("$roll").is_some());
        assert!(embed.field_value("$shutdown").is_none());

        h.send(OWNER, "$?").await;
        let embed = h.chat.last_embed().unwrap();
        assert!(embed.field_value("$shutdown").is_some());
        assert_eq!(embed.fields.len(), h.router.registry().len());
    }

    #[tokio::test]
    async fn test_ping_reports_latency() {
        let h = Harness::new();
        h.send(STRANGER, "$ms").await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.title, "Pong!");
        assert_eq!(embed.description, "Latency: 42 ms");
        assert_eq!(embed.color, Color::Gold);
    }

    #[tokio::test]
    async fn test_uptime() {
        let h = Harness::new();
        h.send(STRANGER, "$uptime").await;
        let embed = h.chat.last_embed().unwrap();
        assert!(embed.description.starts_with("The bot has been running for: 0d 0h 0m"));
    }

    #[tokio::test]
    async fn test_botinfo_without_repository() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.bot.log_dir = dir.path().to_path_buf();
        let h = Harness::with_config(config);
        h.send(STRANGER, "$about").await;

        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.title, "dotzbot");
        assert_eq!(embed.field_value("Latest Commit"), Some("Could not fetch"));
        assert_eq!(embed.field_value("Room Count"), Some("2"));
        assert_eq!(embed.field_value("Current Log Length"), Some("0"));
        let (visible, hidden) = h.router.registry().counts();
        assert_eq!(
            embed.field_value("Command Amount").unwrap(),
            format!("{} ({})", visible + hidden, hidden)
        );
    }

    #[tokio::test]
    async fn test_userinfo_wrong_usage() {
        let h = Harness::new();
        h.send(STRANGER, "$userinfo").await;
        h.send(STRANGER, "$userinfo bob").await;
        for embed in h.chat.embeds() {
            assert_eq!(embed.title, "$userinfo wrong usage");
            assert_eq!(embed.color, Color::Red);
        }
        assert_eq!(h.chat.embeds().len(), 2);
    }

    #[tokio::test]
    async fn test_userinfo_unknown_member() {
        let h = Harness::new();
        h.send(STRANGER, "$user @ghost:example.org").await;
        assert!(h.chat.embeds().is_empty());
        assert!(h.chat.messages()[0].starts_with("User doesn't seem to exist?"));
    }

    #[tokio::test]
    async fn test_userinfo_special_descriptions() {
        let chat = MockChat::room()
            .with_member(OWNER, "dotz")
            .with_member(BOT_USER, "dotzbot")
            .with_member(STRANGER, "Alice");
        let h = Harness::with_chat(test_config(), chat);

        h.send(STRANGER, &format!("$userinfo {OWNER}")).await;
        assert_eq!(h.chat.last_embed().unwrap().description, "Hey, It's my creator!");

        h.send(STRANGER, &format!("$checkuser https://matrix.to/#/{BOT_USER}")).await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.description, "Wait a minute, that's me!");
        assert_eq!(embed.field_value("Bot?"), Some("Yes"));

        h.send(OWNER, &format!("$userinfo {STRANGER}")).await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.description, "");
        assert_eq!(embed.field_value("Username"), Some("Alice"));
        assert_eq!(embed.field_value("Homeserver"), Some("example.org"));
        assert!(embed.thumbnail.is_some());
    }

    #[tokio::test]
    async fn test_serverinfo_room_and_dm() {
        let h = Harness::new();
        h.send(STRANGER, "$serverinfo").await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.title, "dotz's corner");
        assert_eq!(embed.color, Color::Green);
        assert_eq!(embed.field_value("Member Count"), Some("3"));
        assert_eq!(embed.field_value("Room Topic"), Some("games and memes"));

        let dm = MockChat::new(RoomDetails {
            room_id: "!dm:example.org".into(),
            joined_members: 2,
            is_direct: true,
            ..Default::default()
        });
        let h = Harness::with_chat(test_config(), dm);
        h.send(STRANGER, "$server").await;
        let embed = h.chat.last_embed().unwrap();
        assert_eq!(embed.title, "This is a DM");
        assert_eq!(embed.color, Color::Gold);
        assert_eq!(embed.field_value("Your User ID"), Some(STRANGER));
    }
}
