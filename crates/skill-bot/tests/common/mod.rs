//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mode_explorer::{
    Block, ExplorerError, ModeExplorer, ModeExplorerClient, NetworkStats, Token, Transaction,
};
use signal_client::{BotMessage, SignalClient, SignalError};
use skill_bot::skills::{MemecoinHandler, ModeHandler};
use skill_bot::{AppResult, Responder, SkillRegistry};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

pub const WEB_URL: &str = "https://explorer.mode.network";
pub const BOT_NUMBER: &str = "+987654321";
pub const USER_NUMBER: &str = "+123456789";

mockall::mock! {
    pub Explorer {}

    #[async_trait]
    impl ModeExplorer for Explorer {
        async fn network_stats(&self) -> Result<NetworkStats, ExplorerError>;
        async fn latest_blocks(&self) -> Result<Vec<Block>, ExplorerError>;
        async fn search_tokens(&self, query: &str) -> Result<Vec<Token>, ExplorerError>;
        async fn latest_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ExplorerError>;
        async fn token_info(&self, address: &str) -> Result<Token, ExplorerError>;
    }
}

/// Records every message sent.
#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<String>>,
}

impl RecordingResponder {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn send(&self, text: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Fails every send, as a disconnected transport would.
pub struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn send(&self, _text: &str) -> AppResult<()> {
        Err(SignalError::SendFailed("transport down".into()).into())
    }
}

/// Standard registry over the given explorer.
pub fn registry_with(explorer: Arc<dyn ModeExplorer>) -> SkillRegistry {
    SkillRegistry::standard(
        Arc::new(ModeHandler::new(explorer, WEB_URL)),
        Arc::new(MemecoinHandler::new("Starknet")),
    )
}

/// Create an explorer client configured for a mock server.
pub fn test_explorer_client(mock_server: &MockServer) -> ModeExplorerClient {
    ModeExplorerClient::new(mock_server.uri(), Duration::from_secs(5)).unwrap()
}

/// Create a Signal client configured for a mock server.
pub fn test_signal_client(mock_server: &MockServer) -> SignalClient {
    SignalClient::new(mock_server.uri(), BOT_NUMBER, Duration::from_secs(5)).unwrap()
}

pub fn user_message(text: &str) -> BotMessage {
    BotMessage {
        source: USER_NUMBER.to_string(),
        source_name: Some("Test User".to_string()),
        text: text.to_string(),
        timestamp: 1677652288000,
        group_id: None,
        receiving_account: BOT_NUMBER.to_string(),
    }
}

pub fn transaction(n: usize) -> Transaction {
    Transaction {
        hash: format!("0x{:064x}", n),
        from: "0x1111111111111111111111111111111111111111".into(),
        to: "0x2222222222222222222222222222222222222222".into(),
        value: "1000000000000000000".into(),
        fee: "21000000000000".into(),
        timestamp: "2024-05-01T10:00:00Z".into(),
        status: "ok".into(),
    }
}
