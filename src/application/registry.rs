//! # Command Registry
//!
//! Maps command names and aliases to handler descriptors. Built once at
//! startup and read-only afterwards.

use crate::application::logging;
use crate::application::state::BotState;
use crate::domain::config::BotConfig;
use crate::domain::embed::Embed;
use crate::domain::traits::{BotClient, ChatProvider};
use crate::domain::types::Invocation;
use anyhow::{Result, anyhow, bail};
use futures::future::BoxFuture;
use std::collections::HashMap;

/// Everything a handler can reach while running.
pub struct CommandContext<'a> {
    pub chat: &'a dyn ChatProvider,
    pub client: &'a dyn BotClient,
    pub invocation: &'a Invocation,
    pub state: &'a BotState,
    pub registry: &'a CommandRegistry,
}

impl CommandContext<'_> {
    pub fn bot(&self) -> &BotConfig {
        &self.state.config.bot
    }

    pub fn is_owner(&self) -> bool {
        self.state.is_owner(&self.invocation.sender)
    }

    /// Reply to the invoking message.
    pub async fn reply(&self, embed: Embed) -> Result<()> {
        self.chat
            .send_embed(&embed, self.invocation.event_id.as_deref())
            .await
            .map(|_| ())
            .map_err(|e| anyhow!(e))
    }

    pub async fn say(&self, content: &str) -> Result<()> {
        self.chat
            .send_message(content)
            .await
            .map(|_| ())
            .map_err(|e| anyhow!(e))
    }

    pub fn usage(&self, detail: &str) {
        logging::usage(self.invocation, detail);
    }
}

pub type CommandFn = for<'a> fn(&'a CommandContext<'a>) -> BoxFuture<'a, Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Fun,
    Info,
    Admin,
}

/// Who may run a command. Evaluated by the router before the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Everyone,
    Owner,
}

impl Permission {
    pub fn allows(&self, bot: &BotConfig, user_id: &str) -> bool {
        match self {
            Permission::Everyone => true,
            Permission::Owner => bot.is_owner(user_id),
        }
    }
}

#[derive(Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub category: Category,
    pub hidden: bool,
    pub permission: Permission,
    pub handler: CommandFn,
}

impl CommandSpec {
    /// A visible command anyone may run.
    pub fn public(
        name: &'static str,
        aliases: &'static [&'static str],
        description: &'static str,
        category: Category,
        handler: CommandFn,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            category,
            hidden: false,
            permission: Permission::Everyone,
            handler,
        }
    }

    /// A hidden command only the owner may run.
    pub fn owner_only(
        name: &'static str,
        aliases: &'static [&'static str],
        description: &'static str,
        handler: CommandFn,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            category: Category::Admin,
            hidden: true,
            permission: Permission::Owner,
            handler,
        }
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("hidden", &self.hidden)
            .field("permission", &self.permission)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    lookup: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command. Fails if its name or any alias is already taken.
    pub fn register(&mut self, spec: CommandSpec) -> Result<()> {
        let keys: Vec<String> = std::iter::once(spec.name)
            .chain(spec.aliases.iter().copied())
            .map(str::to_lowercase)
            .collect();

        for (i, key) in keys.iter().enumerate() {
            if let Some(&existing) = self.lookup.get(key) {
                bail!(
                    "'{}' of command '{}' is already registered by '{}'",
                    key,
                    spec.name,
                    self.commands[existing].name
                );
            }
            if keys[..i].contains(key) {
                bail!("'{}' is listed twice for command '{}'", key, spec.name);
            }
        }

        let index = self.commands.len();
        for key in keys {
            self.lookup.insert(key, index);
        }
        self.commands.push(spec);
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Option<&CommandSpec> {
        self.lookup
            .get(&token.to_lowercase())
            .map(|&i| &self.commands[i])
    }

    /// All commands in registration order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// Commands the user may see in the help listing.
    pub fn visible_for(&self, is_owner: bool) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().filter(move |c| is_owner || !c.hidden)
    }

    /// `(visible, hidden)`
    pub fn counts(&self) -> (usize, usize) {
        let hidden = self.commands.iter().filter(|c| c.hidden).count();
        (self.commands.len() - hidden, hidden)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
