//! Deterministic in-memory explorer.
//!
//! Serves fabricated but stable data through the same [`ModeExplorer`]
//! contract as the HTTP client. Used for offline runs (`EXPLORER__BACKEND=stub`)
//! and as a test double.

use crate::error::{ExplorerError, Resource};
use crate::explorer::{ModeExplorer, MAX_TRANSACTION_LIMIT};
use crate::types::{Block, NetworkStats, Token, Transaction};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Address of the token the stub always knows about.
pub const STUB_TOKEN_ADDRESS: &str = "0xA2aa501b19aff244D90cc15a4Cf739D2725B5729";

const GENESIS_HEIGHT: u64 = 9_000_000;
const BLOCK_COUNT: u64 = 10;
/// 2024-05-01T10:00:00Z
const BASE_TIMESTAMP: i64 = 1_714_557_600;

pub struct StubExplorer {
    stats: NetworkStats,
    blocks: Vec<Block>,
    tokens: Vec<Token>,
    transactions: Option<Vec<Transaction>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StubExplorer {
    pub fn new() -> Self {
        Self {
            stats: default_stats(),
            blocks: (0..BLOCK_COUNT).map(|i| fabricate_block(GENESIS_HEIGHT - i)).collect(),
            tokens: default_tokens(),
            transactions: None,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Serve a fixed transaction list, ignoring the requested limit the way
    /// the upstream API may.
    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    /// Make every query fail with an upstream 503 carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of queries served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self, resource: Resource) -> Result<(), ExplorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(resource = %resource, "Stub explorer query");

        match &self.failure {
            Some(message) => Err(ExplorerError::Api {
                resource,
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for StubExplorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModeExplorer for StubExplorer {
    async fn network_stats(&self) -> Result<NetworkStats, ExplorerError> {
        self.begin(Resource::Stats)?;
        Ok(self.stats.clone())
    }

    async fn latest_blocks(&self) -> Result<Vec<Block>, ExplorerError> {
        self.begin(Resource::Blocks)?;
        Ok(self.blocks.clone())
    }

    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>, ExplorerError> {
        self.begin(Resource::Tokens)?;

        let needle = query.trim().to_lowercase();
        Ok(self
            .tokens
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.name.to_lowercase().contains(&needle)
                    || t.symbol.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn latest_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ExplorerError> {
        self.begin(Resource::Transactions)?;

        Ok(match &self.transactions {
            Some(fixed) => fixed.clone(),
            None => (0..limit.min(MAX_TRANSACTION_LIMIT))
                .map(fabricate_transaction)
                .collect(),
        })
    }

    async fn token_info(&self, address: &str) -> Result<Token, ExplorerError> {
        self.begin(Resource::TokenInfo)?;

        let address = address.trim();
        self.tokens
            .iter()
            .find(|t| t.address.eq_ignore_ascii_case(address))
            .cloned()
            .ok_or_else(|| ExplorerError::TokenNotFound(address.to_string()))
    }
}

fn digest(seed: &str) -> String {
    format!("0x{}", hex::encode(Sha256::digest(seed.as_bytes())))
}

fn address(seed: &str) -> String {
    // 20-byte address from the tail of the digest.
    let hash = digest(seed);
    format!("0x{}", &hash[hash.len() - 40..])
}

fn timestamp(seconds_ago: i64) -> String {
    let base = DateTime::<Utc>::from_timestamp(BASE_TIMESTAMP, 0).unwrap_or_default();
    (base - Duration::seconds(seconds_ago)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn fabricate_block(height: u64) -> Block {
    let offset = GENESIS_HEIGHT - height;
    Block {
        height: height.to_string(),
        timestamp: timestamp(offset as i64 * 2),
        tx_count: (3 + (height % 17)).to_string(),
        miner: address(&format!("miner-{}", height % 3)),
        size: (1_200 + (height % 900)).to_string(),
        hash: digest(&format!("block-{}", height)),
        block_type: "block".into(),
    }
}

fn fabricate_transaction(index: usize) -> Transaction {
    let hash = digest(&format!("tx-{}", index));
    Transaction {
        from: address(&format!("from-{}", index)),
        to: address(&format!("to-{}", index)),
        value: ((index as u64 + 1) * 10_000_000_000_000_000).to_string(),
        fee: (21_000 * (index as u64 + 3)).to_string(),
        timestamp: timestamp(index as i64 * 3),
        status: if index % 7 == 6 { "error" } else { "ok" }.into(),
        hash,
    }
}

fn default_stats() -> NetworkStats {
    let stats = json!({
        "total_blocks": "9000000",
        "total_transactions": "41250000",
        "total_addresses": "1850000",
        "average_block_time": 2000.0,
        "transactions_today": "96000",
        "network_utilization_percentage": 12.5
    });

    match stats {
        Value::Object(map) => NetworkStats(map),
        _ => NetworkStats(Map::new()),
    }
}

fn default_tokens() -> Vec<Token> {
    let token = |address: &str, name: &str, symbol: &str, holders: &str, supply: &str| Token {
        address: address.into(),
        name: name.into(),
        symbol: symbol.into(),
        token_type: "ERC-20".into(),
        holders: holders.into(),
        total_supply: supply.into(),
        decimals: "18".into(),
    };

    vec![
        token(
            STUB_TOKEN_ADDRESS,
            "Stub Token",
            "STUB",
            "1024",
            "1000000000000000000000000",
        ),
        token(
            "0xDfc7C877a950e49D2610114102175A06C2e3167a",
            "Mode",
            "MODE",
            "250000",
            "10000000000000000000000000000",
        ),
        token(
            "0x4200000000000000000000000000000000000006",
            "Wrapped Ether",
            "WETH",
            "98000",
            "4200000000000000000000",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_token_lookup_ignores_case() {
        let stub = StubExplorer::new();
        let token = tokio_test::block_on(stub.token_info(&STUB_TOKEN_ADDRESS.to_lowercase())).unwrap();

        assert_eq!(token.name, "Stub Token");
        assert_eq!(token.symbol, "STUB");
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_unknown_token_is_not_found() {
        let stub = StubExplorer::new();
        let result = tokio_test::block_on(stub.token_info("0x0000000000000000000000000000000000000001"));

        let err = result.unwrap_err();
        assert!(matches!(err, ExplorerError::TokenNotFound(_)));
        assert!(err.to_string().contains("Failed to fetch token info"));
    }

    #[test]
    fn test_fabricated_data_is_stable() {
        let first = tokio_test::block_on(StubExplorer::new().latest_transactions(3)).unwrap();
        let second = tokio_test::block_on(StubExplorer::new().latest_transactions(3)).unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert!(first[0].hash.starts_with("0x"));
        assert_eq!(first[0].from.len(), 42);
    }

    #[test]
    fn test_search_filters_by_name_or_symbol() {
        let stub = StubExplorer::new();

        let weth = tokio_test::block_on(stub.search_tokens("weth")).unwrap();
        assert_eq!(weth.len(), 1);
        assert_eq!(weth[0].name, "Wrapped Ether");

        let all = tokio_test::block_on(stub.search_tokens("")).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_failing_stub_reports_resource() {
        let stub = StubExplorer::new().failing("maintenance");
        let err = tokio_test::block_on(stub.latest_blocks()).unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch Mode blocks: maintenance");
        assert_eq!(err.status(), Some(503));
    }
}
