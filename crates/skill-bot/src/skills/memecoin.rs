//! Memecoin launch skill.

use crate::command::{Command, FromParams, MissingParams, Params};
use crate::error::AppResult;
use crate::reply::{HandlerResult, Responder};
use crate::skills::{SkillHandler, DIVIDER};
use async_trait::async_trait;
use tracing::{error, info};

const MISSING_PROMPT: &str = "Please provide name, symbol and initial supply for your memecoin";
const FAILURE_MESSAGE: &str = "❌ Failed to deploy memecoin. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployMemeParams {
    pub name: String,
    pub symbol: String,
    pub supply: String,
}

impl FromParams for DeployMemeParams {
    fn from_params(params: &Params) -> Result<Self, MissingParams> {
        match (params.text("name"), params.text("symbol"), params.text("supply")) {
            (Some(name), Some(symbol), Some(supply)) => Ok(Self {
                name,
                symbol,
                supply,
            }),
            _ => Err(MissingParams(MISSING_PROMPT.into())),
        }
    }
}

/// Handles `deploymeme`.
///
/// Announces the launch in two interim messages and replies with next steps.
/// No contract is actually submitted to the chain.
pub struct MemecoinHandler {
    chain: String,
}

impl MemecoinHandler {
    pub fn new(chain: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    async fn deploy(&self, params: &DeployMemeParams, out: &dyn Responder) -> AppResult<()> {
        out.send(&format!(
            "🚀 Starting Memecoin Deployment\n{divider}\nName: {}\nSymbol: {}\nSupply: {}\nChain: {}\n{divider}\n\n🔄 Deploying contract...",
            params.name,
            params.symbol,
            params.supply,
            self.chain,
            divider = DIVIDER
        ))
        .await?;

        out.send(&format!(
            "🎉 Contract Deployed!\n\n📢 Posting to Twitter:\n\"🚀 New #memecoin alert! ${} is now live on @{}!\n✨ Join the movement: [contract link]\n#{} #DeFi #memecoin\"",
            params.symbol, self.chain, self.chain
        ))
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SkillHandler for MemecoinHandler {
    fn name(&self) -> &str {
        "memecoin"
    }

    async fn handle(&self, command: &Command, out: &dyn Responder) -> Option<HandlerResult> {
        if command.skill != "deploymeme" {
            return None;
        }

        let params = match DeployMemeParams::from_params(&command.params) {
            Ok(p) => p,
            Err(missing) => return Some(missing.into()),
        };

        info!(
            sender = %command.sender,
            name = %params.name,
            symbol = %params.symbol,
            supply = %params.supply,
            chain = %self.chain,
            "Deploying memecoin"
        );

        if let Err(e) = self.deploy(&params, out).await {
            error!("Error deploying memecoin: {}", e);
            return Some(HandlerResult::internal(FAILURE_MESSAGE));
        }

        Some(HandlerResult::ok(
            "✅ Deployment Complete!\n\n📊 Next steps:\n1. Add liquidity\n2. Create community channels\n3. Start marketing campaign\n\nNeed help with any of these? Just ask!",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::testing::RecordingResponder;

    fn deploy_command() -> Command {
        Command::new("deploymeme", "+1")
            .with_param("name", "Doge2")
            .with_param("symbol", "DOGE2")
            .with_param("supply", "1000000")
    }

    #[tokio::test]
    async fn test_deploy_sends_two_messages() {
        let handler = MemecoinHandler::new("Starknet");
        let out = RecordingResponder::default();

        let result = handler.handle(&deploy_command(), &out).await.unwrap();

        assert_eq!(result.code, 200);
        assert!(result.message.starts_with("✅ Deployment Complete!"));

        let sent = out.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].starts_with("🚀 Starting Memecoin Deployment\n"));
        assert!(sent[0].contains("Name: Doge2\nSymbol: DOGE2\nSupply: 1000000\nChain: Starknet\n"));
        assert!(sent[0].ends_with("🔄 Deploying contract..."));
        assert!(sent[1].contains("$DOGE2 is now live on @Starknet!"));
        assert!(sent[1].contains("#Starknet #DeFi #memecoin"));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let handler = MemecoinHandler::new("Starknet");

        for missing in ["name", "symbol", "supply"] {
            let mut command = Command::new("deploymeme", "+1");
            for field in ["name", "symbol", "supply"] {
                if field != missing {
                    command = command.with_param(field, "x");
                }
            }

            let out = RecordingResponder::default();
            let result = handler.handle(&command, &out).await.unwrap();

            assert_eq!(result, HandlerResult::bad_request(MISSING_PROMPT));
            assert!(out.sent().is_empty());
        }
    }

    #[tokio::test]
    async fn test_other_skills_ignored() {
        let handler = MemecoinHandler::new("Starknet");
        let out = RecordingResponder::default();

        assert!(handler.handle(&Command::new("modestats", "+1"), &out).await.is_none());
    }
}
