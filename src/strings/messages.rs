//! # Messages
//!
//! Titles, descriptions and field texts of the bot's replies.

pub const BOT_NAME: &str = "dotzbot";

// Errors
pub const ERROR_TITLE: &str = "An error occurred";

pub fn error_description(kind: &str, message: &str) -> String {
    format!("{kind}: {message}")
}

pub fn bad_integer(param: &str) -> String {
    format!("Converting to \"int\" failed for parameter \"{param}\".")
}

// Status
pub const ONLINE_TITLE: &str = "dotzbot is online";
pub const OFFLINE_TITLE: &str = "dotzbot is offline";

pub fn uptime_field(uptime: &str) -> String {
    format!("Uptime: {uptime}")
}

pub fn disallowed_room(inviter: &str) -> String {
    format!(
        "Sorry {inviter}, This room isn't a part of the allowed room list. Contact the bot owner for help."
    )
}

// Fun
pub const MEME_TITLE: &str = "Random Meme";
pub const NO_MEMES_TITLE: &str = "No Memes Found";
pub const NO_MEMES_DESC: &str = "Report to the bot owner";

pub fn file_count(count: usize) -> String {
    format!("{count} Files")
}

pub const DICE_TITLE: &str = "Dice Roll";

pub fn dice_rejected(user: &str, sides: i64) -> String {
    format!("{user} just tried to roll a {sides}-sided dice")
}

pub fn dice_rolled(user: &str, sides: i64, roll: u64) -> String {
    format!("{user} rolled a {sides}-sided dice and got {roll}")
}

pub const COIN_TITLE: &str = "Coin Flip";

pub fn coin_landed(user: &str, side: &str) -> String {
    format!("{user} flipped a coin and it landed on {side}")
}

pub const HIGH_CARD_TITLE: &str = "High Card Result";

pub fn high_card_win(winner: &str, winning: &str, loser: &str, losing: &str) -> String {
    format!("{winner} won with a {winning} against {loser}'s {losing}")
}

pub fn high_card_tie(card: &str) -> String {
    format!("It's a tie! Both drew a {card}")
}

pub fn rps_usage_title(prefix: &str) -> String {
    format!("{prefix}rps wrong usage")
}

pub const RPS_USAGE_DESC: &str = "You're supposed to say either rock, paper or scissors";
pub const RPS_TITLE: &str = "Rock Paper Scissors";
pub const RPS_TIE: &str = "It's a tie!";

pub fn rps_wins(who: &str) -> String {
    format!("{who} wins!")
}

pub fn rps_description(user: &str, user_choice: &str, bot: &str, bot_choice: &str, result: &str) -> String {
    format!("{user} chose **{user_choice}**\n{bot} chose **{bot_choice}**\n\n{result}")
}

pub const EIGHT_BALL_TITLE: &str = "8 ball's answer";

pub fn eight_ball_says(answer: &str) -> String {
    format!("The 8 ball says: {answer}")
}

// Info
pub const HELP_TITLE: &str = "dotzbot's commands";
pub const NO_DESCRIPTION: &str = "No description.";

pub fn help_aliases(aliases: &str) -> String {
    format!("_Aliases: {aliases}_")
}

pub const PONG_TITLE: &str = "Pong!";

pub fn latency(ms: u128) -> String {
    format!("Latency: {ms} ms")
}

pub const UPTIME_TITLE: &str = "dotzbot's Uptime";

pub fn uptime_description(uptime: &str) -> String {
    format!("The bot has been running for: {uptime}")
}

pub fn bot_info_description(developer: &str) -> String {
    format!("By {developer} / Open-Source!")
}

pub const COMMIT_FETCH_FAILED: &str = "Could not fetch";
pub const UNKNOWN: &str = "Unknown";

pub fn command_amount(total: usize, hidden: usize) -> String {
    format!("{total} ({hidden})")
}

pub fn userinfo_usage_title(prefix: &str) -> String {
    format!("{prefix}userinfo wrong usage")
}

pub const USERINFO_USAGE_DESC: &str = "You're supposed to provide a user with a mention or their ID";
pub const USER_NOT_FOUND: &str =
    "User doesn't seem to exist? Try again with copying their ID or mentioning them";
pub const USER_INFO_TITLE: &str = "User Information";
pub const USER_IS_OWNER: &str = "Hey, It's my creator!";
pub const USER_IS_BOT: &str = "Wait a minute, that's me!";

pub const DM_TITLE: &str = "This is a DM";
pub const DM_DESC: &str = "But I'll try to give you some information anyways";

// Admin
pub const SERVER_LIST_TITLE: &str = "Server List";

pub fn server_list_description(count: usize) -> String {
    format!("The bot is in {count} rooms:")
}

pub fn server_entry(room_id: &str, members: u64) -> String {
    format!("ID: {room_id} | Members: {members}")
}

pub const STATS_TITLE: &str = "Usage Statistics";

pub fn stats_pair(total: impl std::fmt::Display, window: impl std::fmt::Display) -> String {
    format!("{total} total / {window} this window")
}

pub const SHUTDOWN_REACTION: &str = "✅";
