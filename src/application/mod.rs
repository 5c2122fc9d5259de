//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command routing, the games, usage statistics, logging and
//! the background tasks.

pub mod error;
pub mod games;
pub mod logging;
pub mod presence;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod uptime;
