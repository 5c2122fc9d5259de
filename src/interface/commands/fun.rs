//! # Fun Commands
//!
//! Memes and the randomized mini-games. Every draw uses the operating
//! system's RNG.

use crate::application::error::CommandError;
use crate::application::games::{self, AnswerCategory, Outcome, RpsChoice};
use crate::application::registry::{Category, CommandContext, CommandRegistry, CommandSpec};
use crate::domain::embed::{Color, Embed};
use crate::domain::types::mention;
use crate::strings::messages;
use anyhow::{Context, Result, anyhow};
use futures::FutureExt;
use futures::future::BoxFuture;
use rand::rngs::OsRng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_DICE_SIDES: i64 = 100;

pub fn register(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(CommandSpec::public("meme", &["memes"], "Get a random meme", Category::Fun, meme))?;
    registry.register(CommandSpec::public(
        "roll",
        &["dice", "dice_roll", "diceroll", "rolldice", "roll_dice"],
        "Roll an X sided dice",
        Category::Fun,
        roll,
    ))?;
    registry.register(CommandSpec::public(
        "coinflip",
        &["cf", "coin", "flip", "flipacoin"],
        "Flip a coin, Heads or tails?",
        Category::Fun,
        coinflip,
    ))?;
    registry.register(CommandSpec::public("highcard", &["hc"], "Highest card wins", Category::Fun, highcard))?;
    registry.register(CommandSpec::public(
        "rps",
        &[],
        "Play Rock Paper Scissors",
        Category::Fun,
        rps,
    ))?;
    registry.register(CommandSpec::public(
        "eightball",
        &["8ball", "8b"],
        "The wisdom of the eight ball upon you",
        Category::Fun,
        eightball,
    ))?;
    Ok(())
}

/// Regular files directly inside `dir`, sorted by name. A missing directory
/// has no files.
async fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", dir.display())),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn meme<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let files = list_files(&ctx.bot().meme_dir).await?;
        let count = messages::file_count(files.len());

        let Some(path) = games::pick_file(&mut OsRng, &files) else {
            let embed = Embed::new(messages::NO_MEMES_TITLE, messages::NO_MEMES_DESC, Color::Red)
                .field("", count, true)
                .requested_by(ctx.invocation);
            ctx.reply(embed).await?;
            ctx.usage("found no memes");
            tracing::error!("No meme found in {}", ctx.bot().meme_dir.display());
            return Ok(());
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let embed = Embed::new(messages::MEME_TITLE, name.as_str(), Color::Green)
            .field("", count, true)
            .requested_by(ctx.invocation);
        ctx.reply(embed).await?;
        ctx.chat.send_file(path).await.map_err(|e| anyhow!(e))?;
        ctx.usage(&format!("got the meme {name}"));
        Ok(())
    }
    .boxed()
}

fn roll<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let sides = match ctx.invocation.args.first() {
            None => DEFAULT_DICE_SIDES,
            Some(arg) => arg
                .parse::<i64>()
                .map_err(|_| CommandError::BadArgument(messages::bad_integer("sides")))?,
        };
        let user = ctx.invocation.author_mention();

        let embed = match games::roll_die(&mut OsRng, sides) {
            Ok(result) => {
                ctx.usage(&format!("rolled a {sides}-sided dice and got {result}"));
                Embed::new(messages::DICE_TITLE, messages::dice_rolled(&user, sides, result), Color::Green)
            }
            Err(_) => {
                ctx.usage(&format!("just tried to roll a {sides}-sided dice"));
                Embed::new(messages::DICE_TITLE, messages::dice_rejected(&user, sides), Color::Red)
            }
        };
        ctx.reply(embed.requested_by(ctx.invocation)).await
    }
    .boxed()
}

fn coinflip<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let side = games::flip_coin(&mut OsRng);
        let embed = Embed::new(
            messages::COIN_TITLE,
            messages::coin_landed(&ctx.invocation.author_mention(), side.as_str()),
            Color::Green,
        )
        .requested_by(ctx.invocation);
        ctx.reply(embed).await?;
        ctx.usage(&format!("coin landed on {}", side.as_str()));
        Ok(())
    }
    .boxed()
}

fn highcard<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let round = games::high_card(&mut OsRng);
        let user = ctx.invocation.author_mention();
        let bot = mention(&ctx.client.user_id());
        let (user_card, bot_card) = (round.user.name(), round.bot.name());

        let (description, color) = match round.outcome() {
            Outcome::UserWins => (messages::high_card_win(&user, &user_card, &bot, &bot_card), Color::Green),
            Outcome::BotWins => (messages::high_card_win(&bot, &bot_card, &user, &user_card), Color::Red),
            Outcome::Tie => (messages::high_card_tie(&user_card), Color::Yellow),
        };

        ctx.reply(Embed::new(messages::HIGH_CARD_TITLE, description, color).requested_by(ctx.invocation))
            .await?;
        ctx.usage(&format!("drew {user_card} against the bot's {bot_card}"));
        Ok(())
    }
    .boxed()
}

fn rps<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let choice = ctx.invocation.args.first().and_then(|a| RpsChoice::parse(a));
        let Some(user_choice) = choice else {
            let embed = Embed::new(
                messages::rps_usage_title(&ctx.bot().prefix),
                messages::RPS_USAGE_DESC,
                Color::Red,
            )
            .requested_by(ctx.invocation);
            ctx.reply(embed).await?;
            ctx.usage(&format!(
                "failed to provide either rock, paper or scissors ({})",
                ctx.invocation.args.first().map(String::as_str).unwrap_or("None")
            ));
            return Ok(());
        };

        let bot_choice = RpsChoice::random(&mut OsRng);
        let user = ctx.invocation.author_mention();
        let bot = mention(&ctx.client.user_id());

        let (result, color) = match games::rps_outcome(user_choice, bot_choice) {
            Outcome::Tie => (messages::RPS_TIE.to_string(), Color::Gold),
            Outcome::UserWins => (messages::rps_wins(&user), Color::Green),
            Outcome::BotWins => (messages::rps_wins(&bot), Color::Red),
        };

        let description = messages::rps_description(
            &user,
            user_choice.capitalized(),
            &bot,
            bot_choice.capitalized(),
            &result,
        );
        ctx.reply(Embed::new(messages::RPS_TITLE, description, color).requested_by(ctx.invocation))
            .await?;
        ctx.usage(&format!(
            "played {} against the bot's {}",
            user_choice.as_str(),
            bot_choice.as_str()
        ));
        Ok(())
    }
    .boxed()
}

fn eightball<'a>(ctx: &'a CommandContext<'a>) -> BoxFuture<'a, Result<()>> {
    async move {
        let (category, answer) = games::eight_ball(&mut OsRng);
        let color = match category {
            AnswerCategory::Yes => Color::Green,
            AnswerCategory::No => Color::Red,
            AnswerCategory::Unknown => Color::Yellow,
        };

        let embed = Embed::new(messages::EIGHT_BALL_TITLE, messages::eight_ball_says(answer), color)
            .requested_by(ctx.invocation);
        ctx.reply(embed).await?;
        ctx.usage(&format!("8ball answered to '{}' with {answer}", ctx.invocation.rest()));
        Ok(())
    }
    .boxed()
}
