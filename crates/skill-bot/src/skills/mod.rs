//! Skill handlers.

mod memecoin;
mod mode;

pub use memecoin::{DeployMemeParams, MemecoinHandler};
pub use mode::{
    format_blocks, format_stats, format_token_info, format_tokens, format_transactions,
    ModeHandler, TokenAddressParams, TokenSearchParams, TransactionListParams,
};

use crate::command::Command;
use crate::reply::{HandlerResult, Responder};
use async_trait::async_trait;

/// Separator line used in every formatted reply.
pub const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━";

/// Skill handler trait.
#[async_trait]
pub trait SkillHandler: Send + Sync {
    /// Handler name, for logging.
    fn name(&self) -> &str;

    /// Handle a command, emitting interim messages through `out`.
    ///
    /// Returns `None` when the skill is not one this handler serves.
    async fn handle(&self, command: &Command, out: &dyn Responder) -> Option<HandlerResult>;
}
