//! Mode network explorer skills.

use crate::command::{Command, FromParams, MissingParams, Params};
use crate::error::{AppError, AppResult};
use crate::reply::{HandlerResult, Responder};
use crate::skills::{SkillHandler, DIVIDER};
use async_trait::async_trait;
use mode_explorer::{
    Block, ModeExplorer, NetworkStats, Token, Transaction, DEFAULT_TRANSACTION_LIMIT,
    MAX_TRANSACTION_LIMIT,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Items shown for block and token listings.
const LIST_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSearchParams {
    pub query: Option<String>,
}

impl FromParams for TokenSearchParams {
    fn from_params(params: &Params) -> Result<Self, MissingParams> {
        Ok(Self {
            query: params.text("query"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionListParams {
    pub limit: usize,
}

impl FromParams for TransactionListParams {
    /// Absent, non-numeric and non-positive limits fall back to the default.
    fn from_params(params: &Params) -> Result<Self, MissingParams> {
        let limit = params
            .number("limit")
            .filter(|n| *n > 0)
            .map(|n| (n as usize).min(MAX_TRANSACTION_LIMIT))
            .unwrap_or(DEFAULT_TRANSACTION_LIMIT);

        Ok(Self { limit })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAddressParams {
    pub address: String,
}

impl FromParams for TokenAddressParams {
    fn from_params(params: &Params) -> Result<Self, MissingParams> {
        params
            .text("address")
            .map(|address| Self { address })
            .ok_or_else(|| MissingParams("Please provide a token address".into()))
    }
}

/// Handles `modestats`, `modeblocks`, `modetokens`, `modetransactions` and
/// `modetoken`.
pub struct ModeHandler {
    explorer: Arc<dyn ModeExplorer>,
    web_url: String,
}

impl ModeHandler {
    /// `web_url` is the explorer's browsable site, used for links.
    pub fn new(explorer: Arc<dyn ModeExplorer>, web_url: impl Into<String>) -> Self {
        Self {
            explorer,
            web_url: web_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn stats(&self, out: &dyn Responder) -> AppResult<HandlerResult> {
        let stats = self.explorer.network_stats().await?;
        out.send(&format_stats(&stats)).await?;
        Ok(HandlerResult::ok("Stats fetched successfully"))
    }

    async fn blocks(&self, out: &dyn Responder) -> AppResult<HandlerResult> {
        let blocks = self.explorer.latest_blocks().await?;
        if blocks.is_empty() {
            return Ok(HandlerResult::not_found("No blocks found"));
        }

        out.send(&format_blocks(&blocks)).await?;
        Ok(HandlerResult::ok("Blocks fetched successfully"))
    }

    async fn tokens(&self, params: &Params, out: &dyn Responder) -> AppResult<HandlerResult> {
        let TokenSearchParams { query } = match TokenSearchParams::from_params(params) {
            Ok(p) => p,
            Err(missing) => return Ok(missing.into()),
        };

        let tokens = self
            .explorer
            .search_tokens(query.as_deref().unwrap_or_default())
            .await?;
        if tokens.is_empty() {
            return Ok(HandlerResult::not_found("No tokens found"));
        }

        out.send(&format_tokens(&tokens, query.as_deref())).await?;
        Ok(HandlerResult::ok("Tokens fetched successfully"))
    }

    async fn transactions(&self, params: &Params, out: &dyn Responder) -> AppResult<HandlerResult> {
        let TransactionListParams { limit } = match TransactionListParams::from_params(params) {
            Ok(p) => p,
            Err(missing) => return Ok(missing.into()),
        };

        let mut transactions = self.explorer.latest_transactions(limit).await?;
        // Upstream treats the limit as a hint.
        transactions.truncate(limit);
        if transactions.is_empty() {
            return Ok(HandlerResult::not_found("No transactions found"));
        }

        out.send(&format_transactions(&transactions, &self.web_url))
            .await?;
        Ok(HandlerResult::ok("Transactions fetched successfully"))
    }

    async fn token(&self, params: &Params) -> AppResult<HandlerResult> {
        let TokenAddressParams { address } = match TokenAddressParams::from_params(params) {
            Ok(p) => p,
            Err(missing) => return Ok(missing.into()),
        };

        let token = self.explorer.token_info(&address).await?;
        Ok(HandlerResult::ok(format_token_info(&token)))
    }

    async fn fail(&self, skill: &str, err: AppError, out: &dyn Responder) -> HandlerResult {
        error!(skill = %skill, error = %err, "Mode handler error");

        let message = err.to_string();
        if let Err(e) = out.send(&format!("❌ Error: {}", message)).await {
            warn!("Failed to deliver error message: {}", e);
        }
        HandlerResult::internal(format!("Error: {}", message))
    }
}

#[async_trait]
impl SkillHandler for ModeHandler {
    fn name(&self) -> &str {
        "mode"
    }

    async fn handle(&self, command: &Command, out: &dyn Responder) -> Option<HandlerResult> {
        let outcome = match command.skill.as_str() {
            "modestats" => self.stats(out).await,
            "modeblocks" => self.blocks(out).await,
            "modetokens" => self.tokens(&command.params, out).await,
            "modetransactions" => self.transactions(&command.params, out).await,
            "modetoken" => self.token(&command.params).await,
            _ => return None,
        };

        info!(
            skill = %command.skill,
            sender = %command.sender,
            params = ?command.params,
            "Handled Mode request"
        );

        Some(match outcome {
            Ok(result) => result,
            Err(e) => self.fail(&command.skill, e, out).await,
        })
    }
}

pub fn format_stats(stats: &NetworkStats) -> String {
    let lines: Vec<String> = stats
        .entries()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();

    format!("📊 Mode Network Statistics\n{}\n{}", DIVIDER, lines.join("\n"))
}

pub fn format_blocks(blocks: &[Block]) -> String {
    let list: Vec<String> = blocks
        .iter()
        .take(LIST_SIZE)
        .enumerate()
        .map(|(i, block)| {
            format!(
                "{}. Block #{}\n   📅 Time: {}\n   📦 Transactions: {}\n   ⛏️ Miner: {}\n   🔗 Hash: {}\n",
                i + 1,
                block.height,
                block.timestamp,
                block.tx_count,
                block.miner,
                block.hash
            )
        })
        .collect();

    format!("🏗️ Latest Mode Blocks\n{}\n{}", DIVIDER, list.join("\n"))
}

pub fn format_tokens(tokens: &[Token], query: Option<&str>) -> String {
    let list: Vec<String> = tokens
        .iter()
        .take(LIST_SIZE)
        .enumerate()
        .map(|(i, token)| {
            format!(
                "{}. {} ({})\n   📝 Type: {}\n   📍 Address: {}\n   👥 Holders: {}\n",
                i + 1,
                token.name,
                token.symbol,
                token.token_type,
                token.address,
                token.holders
            )
        })
        .collect();

    let matching = query
        .filter(|q| !q.is_empty())
        .map(|q| format!(" matching \"{}\"", q))
        .unwrap_or_default();

    format!("🪙 Mode Tokens{}\n{}\n{}", matching, DIVIDER, list.join("\n"))
}

/// One numbered block per transaction, in input order.
pub fn format_transactions(transactions: &[Transaction], web_url: &str) -> String {
    let list: Vec<String> = transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            format!(
                "{}. Transaction Details\n   🔗 Hash: {}\n   📤 From: {}\n   📥 To: {}\n   💰 Value: {}\n   🏷️ Fee: {}\n   ⏰ Time: {}\n   ✅ Status: {}\n   🔍 View: {}/tx/{}\n",
                i + 1,
                tx.hash,
                tx.from,
                tx.to,
                tx.value,
                tx.fee,
                tx.timestamp,
                tx.status,
                web_url,
                tx.hash
            )
        })
        .collect();

    format!(
        "🔄 Latest Mode Transactions\n{}\n{}\n\nView more at: {}/transactions",
        DIVIDER,
        list.join("\n"),
        web_url
    )
}

pub fn format_token_info(token: &Token) -> String {
    format!(
        "🪙 Token Information\n{}\nName: {}\nSymbol: {}\nAddress: {}\nType: {}\nDecimals: {}\nHolders: {}\nTotal Supply: {}",
        DIVIDER,
        token.name,
        token.symbol,
        token.address,
        token.token_type,
        token.decimals,
        token.holders,
        token.total_supply
    )
}
