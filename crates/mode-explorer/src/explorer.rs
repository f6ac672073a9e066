//! Explorer data source contract.

use crate::error::ExplorerError;
use crate::types::{Block, NetworkStats, Token, Transaction};
use async_trait::async_trait;

/// Transactions requested when the caller gives no usable limit.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 5;

/// Upper bound on a single transaction listing.
pub const MAX_TRANSACTION_LIMIT: usize = 50;

/// Read-only queries against the Mode network explorer.
///
/// Each method performs a single upstream request. List queries return an
/// empty vector when the upstream payload carries no items; only
/// [`ModeExplorer::token_info`] treats a missing record as an error.
#[async_trait]
pub trait ModeExplorer: Send + Sync {
    /// Current network statistics.
    async fn network_stats(&self) -> Result<NetworkStats, ExplorerError>;

    /// Most recent blocks, newest first.
    async fn latest_blocks(&self) -> Result<Vec<Block>, ExplorerError>;

    /// Search ERC-20/721/1155 tokens. An empty query lists tokens.
    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>, ExplorerError>;

    /// Most recent transactions. `limit` is a hint passed upstream.
    async fn latest_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ExplorerError>;

    /// Token record for a contract address.
    async fn token_info(&self, address: &str) -> Result<Token, ExplorerError>;
}
