use crate::application::stats::StatsReport;

pub const STARTING: &str = "Starting dotzbot...";

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn uptime_at_shutdown(uptime: &str) -> String {
    format!("Bot was up for {uptime}")
}

pub fn status_room_fail(room: &str, err: &str) -> String {
    format!("Failed to send status to room {room}: {err}")
}

pub const NO_STATUS_ROOM: &str = "No status room configured, skipping announcement";

pub fn invite_received(room_id: &str, inviter: &str) -> String {
    format!("💌 Received invite for room {room_id} from {inviter}")
}

pub fn join_invite_fail(room_id: &str, err: &str) -> String {
    format!("Failed to join room {room_id} after invite: {err}")
}

pub fn joined_room(room_id: &str) -> String {
    format!("✅ Joined room {room_id}")
}

pub fn left_disallowed_room(room_id: &str) -> String {
    format!("Left disallowed room {room_id}")
}

pub fn leave_room_fail(room_id: &str, err: &str) -> String {
    format!("Failed to leave room {room_id}: {err}")
}

pub fn message_received(sender: &str, room_id: &str, body: &str) -> String {
    format!("Received message from {sender} in {room_id}: {body}")
}

pub fn error_reply_fail(err: &str) -> String {
    format!("Failed to send error reply: {err}")
}

pub fn usage_line(user: &str, room_id: &str, detail: &str) -> String {
    format!("{user} in {room_id}: {detail}")
}

pub fn command_error_line(user: &str, command: &str, room_id: &str, kind: &str, message: &str) -> String {
    format!("{user} ran \"{command}\" in {room_id}: {kind}: {message}")
}

pub fn task_started(name: &str) -> String {
    format!("Started {name}")
}

pub fn activity_set(kind: &str, text: &str) -> String {
    format!("Activity: {kind} {text}")
}

pub fn presence_fail(err: &str) -> String {
    format!("Failed to set presence: {err}")
}

pub fn reminder_scheduled(user: &str, secs: u64) -> String {
    format!("Next reminder for {user} in {secs}s")
}

pub fn reminder_sent(user: &str) -> String {
    format!("Reminded {user}")
}

pub fn reminder_fail(user: &str, err: &str) -> String {
    format!("Reminder for {user} failed: {err}")
}

pub const NO_REMINDER_USER: &str = "No reminder user configured, daily reminder disabled";

pub fn stats_report(report: &StatsReport) -> String {
    format!("Stats: {report}")
}

pub fn commit_fetch_fail(err: &str) -> String {
    format!("Failed to fetch latest commit: {err}")
}
