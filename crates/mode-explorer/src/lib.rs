//! Mode network block-explorer client (Blockscout v2 API).

mod client;
mod error;
mod explorer;
mod stub;
mod types;

pub use client::{ModeExplorerClient, DEFAULT_BASE_URL};
pub use error::{ExplorerError, Resource};
pub use explorer::{ModeExplorer, DEFAULT_TRANSACTION_LIMIT, MAX_TRANSACTION_LIMIT};
pub use stub::{StubExplorer, STUB_TOKEN_ADDRESS};
pub use types::{display_value, Block, NetworkStats, Token, Transaction};
