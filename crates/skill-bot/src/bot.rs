//! Routes inbound chat messages to skills and delivers replies.

use crate::command::Command;
use crate::error::AppResult;
use crate::registry::SkillRegistry;
use crate::reply::{Responder, SignalResponder};
use signal_client::{BotMessage, SignalClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Bot {
    registry: Arc<SkillRegistry>,
    signal: SignalClient,
}

impl Bot {
    pub fn new(registry: Arc<SkillRegistry>, signal: SignalClient) -> Self {
        Self { registry, signal }
    }

    /// Handle one inbound message. Plain chat text is ignored.
    pub async fn handle_message(&self, message: &BotMessage) -> AppResult<()> {
        let Some(text) = message.command_text() else {
            return Ok(());
        };

        let responder = SignalResponder::new(&self.signal, message);
        if let Some(reply) = self.respond(text, &message.source, &responder).await {
            self.signal.reply(message, &reply).await?;
        }
        Ok(())
    }

    /// Run a command and return the final reply text.
    ///
    /// Interim messages go through `out`. `None` means the text was not a
    /// command.
    pub async fn respond(&self, text: &str, sender: &str, out: &dyn Responder) -> Option<String> {
        let command = Command::parse(text, sender, &self.registry)?;
        debug!(skill = %command.skill, sender = %command.sender, "Parsed command");

        if command.skill == "help" {
            return Some(self.registry.help_text());
        }

        match self.registry.dispatch(&command, out).await {
            Some(result) => {
                if result.is_success() {
                    info!(skill = %command.skill, code = result.code, "Command completed");
                } else {
                    warn!(skill = %command.skill, code = result.code, "Command failed");
                }
                Some(result.message)
            }
            None => {
                info!(skill = %command.skill, "Unknown command");
                Some(format!(
                    "Unknown command: /{}. Send /help for the list of commands.",
                    command.skill
                ))
            }
        }
    }
}
