//! # Interface Layer
//!
//! Entry points from the chat service: command handlers and event handlers.

pub mod commands;
pub mod events;
