//! # Command Router
//!
//! Routes incoming messages to the matching handler in `interface/commands`.
//! Parses the prefixed command, counts it, checks the command's permission
//! and turns any failure into an error reply.

use anyhow::Result;
use std::sync::Arc;

use crate::application::error::CommandError;
use crate::application::logging;
use crate::application::registry::{CommandContext, CommandRegistry};
use crate::application::state::BotState;
use crate::domain::embed::{Color, Embed};
use crate::domain::traits::{BotClient, ChatProvider};
use crate::domain::types::{IncomingMessage, Invocation};
use crate::strings::{logs, messages};

pub struct CommandRouter {
    state: Arc<BotState>,
    registry: Arc<CommandRegistry>,
}

impl CommandRouter {
    pub fn new(state: Arc<BotState>, registry: Arc<CommandRegistry>) -> Self {
        Self { state, registry }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handles one room message. Messages from the bot itself and messages
    /// that are not commands are ignored.
    pub async fn route(&self, chat: &dyn ChatProvider, client: &dyn BotClient, message: IncomingMessage) {
        if message.sender == client.user_id() {
            return;
        }

        let Some(invocation) = Invocation::parse(&self.state.config.bot.prefix, &message, &chat.room_id())
        else {
            return;
        };

        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            invocation.command,
            invocation.rest(),
            invocation.sender
        );

        self.state.stats.record_command(&invocation.sender);

        if let Err(err) = self.dispatch(chat, client, &invocation).await {
            self.report(chat, &invocation, &err).await;
        }
    }

    async fn dispatch(&self, chat: &dyn ChatProvider, client: &dyn BotClient, invocation: &Invocation) -> Result<()> {
        let spec = self
            .registry
            .resolve(&invocation.command)
            .ok_or_else(|| CommandError::NotFound(invocation.command.clone()))?;

        if !spec.permission.allows(&self.state.config.bot, &invocation.sender) {
            return Err(CommandError::NotOwner.into());
        }

        let ctx = CommandContext {
            chat,
            client,
            invocation,
            state: self.state.as_ref(),
            registry: self.registry.as_ref(),
        };
        (spec.handler)(&ctx).await
    }

    async fn report(&self, chat: &dyn ChatProvider, invocation: &Invocation, err: &anyhow::Error) {
        self.state.stats.record_error();

        let (kind, message) = CommandError::describe(err);
        logging::command_error(invocation, kind, &message);

        let embed = Embed::new(
            messages::ERROR_TITLE,
            messages::error_description(kind, &message),
            Color::Red,
        )
        .requested_by(invocation);

        if let Err(e) = chat.send_embed(&embed, invocation.event_id.as_deref()).await {
            tracing::warn!("{}", logs::error_reply_fail(&e));
        }
    }
}
