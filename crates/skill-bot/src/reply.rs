//! Handler results and the outbound `send` primitive.

use crate::command::MissingParams;
use crate::error::AppResult;
use async_trait::async_trait;
use signal_client::{BotMessage, SignalClient};

/// Outcome of one skill invocation.
///
/// `code` follows HTTP status conventions and is advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    pub code: u16,
    pub message: String,
}

impl HandlerResult {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const INTERNAL_ERROR: u16 = 500;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Self::OK, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Self::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Self::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl From<MissingParams> for HandlerResult {
    fn from(missing: MissingParams) -> Self {
        Self::bad_request(missing.0)
    }
}

/// Delivers interim messages to the sender of the command being handled.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send(&self, text: &str) -> AppResult<()>;
}

/// Responder replying to a Signal message (direct or group).
pub struct SignalResponder<'a> {
    client: &'a SignalClient,
    message: &'a BotMessage,
}

impl<'a> SignalResponder<'a> {
    pub fn new(client: &'a SignalClient, message: &'a BotMessage) -> Self {
        Self { client, message }
    }
}

#[async_trait]
impl Responder for SignalResponder<'_> {
    async fn send(&self, text: &str) -> AppResult<()> {
        self.client.reply(self.message, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_codes() {
        assert!(HandlerResult::ok("done").is_success());
        assert!(!HandlerResult::not_found("No blocks found").is_success());
        assert!(!HandlerResult::internal("Error: boom").is_success());
    }

    #[test]
    fn test_missing_params_is_bad_request() {
        let result: HandlerResult = MissingParams("Please provide a token address".into()).into();

        assert_eq!(result.code, HandlerResult::BAD_REQUEST);
        assert!(!result.is_success());
    }
}
