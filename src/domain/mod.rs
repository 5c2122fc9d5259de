//! # Domain Layer
//!
//! Core definitions, types, embeds and traits that define the business domain of the bot.
//! Independent of the chat service, serving as the contract for other layers.

pub mod config;
pub mod embed;
pub mod traits;
pub mod types;
