//! Blockscout v2 HTTP client for the Mode network explorer.

use crate::error::{ExplorerError, Resource};
use crate::explorer::ModeExplorer;
use crate::types::*;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};
use urlencoding::encode;

/// Public Mode explorer API.
pub const DEFAULT_BASE_URL: &str = "https://explorer.mode.network/api/v2";

/// Token standards included in token searches.
const TOKEN_TYPES: &str = "ERC-20,ERC-721,ERC-1155";

/// Mode explorer client.
///
/// Performs exactly one GET per query and never retries.
#[derive(Clone)]
pub struct ModeExplorerClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ModeExplorerClient {
    /// Create a new explorer client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ExplorerError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    /// Attach an explorer API key, sent as the `apikey` query parameter.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check - returns true if the stats endpoint answers.
    pub async fn health_check(&self) -> bool {
        self.network_stats().await.is_ok()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ExplorerError> {
        let result = self.fetch(resource, path, query).await;

        if let Err(e) = &result {
            error!(
                resource = %resource,
                path = %path,
                params = ?query,
                status = ?e.status(),
                error = ?e,
                "Explorer request failed"
            );
        }

        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ExplorerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, params = ?query, "Explorer request");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query);

        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apikey", api_key.expose_secret())]);
        }

        // Errors drop the URL; its query holds the API key.
        let response = request
            .send()
            .await
            .map_err(|source| ExplorerError::Http {
                resource,
                source: source.without_url(),
            })?;

        if !response.status().is_success() {
            return Err(Self::extract_error(resource, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|source| ExplorerError::Http {
                resource,
                source: source.without_url(),
            })?;
        debug!(
            "Response body: {}",
            body.chars().take(200).collect::<String>()
        );

        serde_json::from_str(&body).map_err(|source| ExplorerError::Json { resource, source })
    }

    /// Build an error from a non-2xx response, preferring the upstream
    /// `message` field over the raw body.
    async fn extract_error(resource: Resource, response: reqwest::Response) -> ExplorerError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| {
                format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )
            });

        ExplorerError::Api {
            resource,
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ModeExplorer for ModeExplorerClient {
    #[instrument(skip(self))]
    async fn network_stats(&self) -> Result<NetworkStats, ExplorerError> {
        self.get(Resource::Stats, "/stats", &[]).await
    }

    #[instrument(skip(self))]
    async fn latest_blocks(&self) -> Result<Vec<Block>, ExplorerError> {
        let page: Page<Block> = self.get(Resource::Blocks, "/blocks", &[]).await?;
        Ok(page.into_items())
    }

    #[instrument(skip(self))]
    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>, ExplorerError> {
        let params = [("q", query.to_string()), ("type", TOKEN_TYPES.to_string())];
        let page: Page<Token> = self.get(Resource::Tokens, "/tokens", &params).await?;
        Ok(page.into_items())
    }

    #[instrument(skip(self))]
    async fn latest_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ExplorerError> {
        let params = [("limit", limit.to_string())];
        let page: Page<Transaction> = self
            .get(Resource::Transactions, "/transactions", &params)
            .await?;
        Ok(page.into_items())
    }

    #[instrument(skip(self))]
    async fn token_info(&self, address: &str) -> Result<Token, ExplorerError> {
        let path = format!("/tokens/{}", encode(address.trim()));

        match self.get::<Token>(Resource::TokenInfo, &path, &[]).await {
            Ok(token) => Ok(token),
            // Unknown and malformed addresses both surface as a missing token.
            Err(ExplorerError::Api { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16()
                    || status == StatusCode::BAD_REQUEST.as_u16()
                    || status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() =>
            {
                Err(ExplorerError::TokenNotFound(address.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
