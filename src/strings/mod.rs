//! # Strings Module
//!
//! Centralizes user-facing strings and log lines.
//! Keeps the wording of embeds and log output in one place.

pub mod games;
pub mod logs;
pub mod messages;
pub mod presence;
