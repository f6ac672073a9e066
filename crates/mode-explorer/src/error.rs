//! Explorer client errors.

use thiserror::Error;

/// Upstream query that failed, used to prefix error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stats,
    Blocks,
    Tokens,
    Transactions,
    TokenInfo,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Stats => "Mode stats",
            Resource::Blocks => "Mode blocks",
            Resource::Tokens => "Mode tokens",
            Resource::Transactions => "Mode transactions",
            Resource::TokenInfo => "token info",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Failed to fetch {resource}: {source}")]
    Http {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {resource}: {message}")]
    Api {
        resource: Resource,
        status: u16,
        message: String,
    },

    #[error("Failed to fetch {resource}: {source}")]
    Json {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to fetch token info: Token not found")]
    TokenNotFound(String),

    #[error("Failed to build explorer client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ExplorerError {
    /// Upstream HTTP status, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExplorerError::Api { status, .. } => Some(*status),
            ExplorerError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            ExplorerError::TokenNotFound(_) => Some(404),
            _ => None,
        }
    }
}
