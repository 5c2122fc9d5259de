//! # Command Handlers
//!
//! One module per command category. Each registers its handlers with the
//! registry the router dispatches through.

pub mod admin;
pub mod fun;
pub mod info;

use crate::application::registry::CommandRegistry;
use anyhow::Result;

/// Every command the bot answers to, in help-listing order.
pub fn build_registry() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    fun::register(&mut registry)?;
    info::register(&mut registry)?;
    admin::register(&mut registry)?;
    Ok(registry)
}
