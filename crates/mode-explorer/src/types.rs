//! Blockscout v2 response types.
//!
//! Every field is kept as a display string. Upstream values may be numbers,
//! strings, null, or nested objects such as `{"hash": "0x.."}`; they are
//! flattened to text on decode and absent fields become empty strings.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Paginated list envelope (`{"items": [...], "next_page_params": ...}`).
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
}

impl<T> Page<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Network statistics object, in upstream key order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct NetworkStats(pub Map<String, Value>);

impl NetworkStats {
    /// Key/value pairs rendered as display strings.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().map(|(k, v)| (k.as_str(), display_value(v)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    pub height: String,
    pub timestamp: String,
    pub tx_count: String,
    pub miner: String,
    pub size: String,
    pub hash: String,
    pub block_type: String,
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(default, deserialize_with = "display_string")]
    height: String,
    #[serde(default, deserialize_with = "display_string")]
    timestamp: String,
    #[serde(default, deserialize_with = "display_string")]
    tx_count: String,
    #[serde(default, deserialize_with = "display_string")]
    transaction_count: String,
    #[serde(default, deserialize_with = "display_string")]
    miner: String,
    #[serde(default, deserialize_with = "display_string")]
    size: String,
    #[serde(default, deserialize_with = "display_string")]
    hash: String,
    #[serde(default, rename = "type", deserialize_with = "display_string")]
    block_type: String,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            height: raw.height,
            timestamp: raw.timestamp,
            tx_count: first_non_empty(raw.tx_count, raw.transaction_count),
            miner: raw.miner,
            size: raw.size,
            hash: raw.hash,
            block_type: raw.block_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawToken")]
pub struct Token {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub token_type: String,
    pub holders: String,
    pub total_supply: String,
    pub decimals: String,
}

#[derive(Deserialize)]
struct RawToken {
    #[serde(default, deserialize_with = "display_string")]
    address: String,
    #[serde(default, deserialize_with = "display_string")]
    address_hash: String,
    #[serde(default, deserialize_with = "display_string")]
    name: String,
    #[serde(default, deserialize_with = "display_string")]
    symbol: String,
    #[serde(default, rename = "type", deserialize_with = "display_string")]
    token_type: String,
    #[serde(default, deserialize_with = "display_string")]
    holders: String,
    #[serde(default, deserialize_with = "display_string")]
    holders_count: String,
    #[serde(default, deserialize_with = "display_string")]
    total_supply: String,
    #[serde(default, deserialize_with = "display_string")]
    decimals: String,
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        Self {
            address: first_non_empty(raw.address, raw.address_hash),
            name: raw.name,
            symbol: raw.symbol,
            token_type: raw.token_type,
            holders: first_non_empty(raw.holders, raw.holders_count),
            total_supply: raw.total_supply,
            decimals: raw.decimals,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "display_string")]
    pub hash: String,
    #[serde(default, deserialize_with = "display_string")]
    pub from: String,
    #[serde(default, deserialize_with = "display_string")]
    pub to: String,
    #[serde(default, deserialize_with = "display_string")]
    pub value: String,
    #[serde(default, deserialize_with = "display_string")]
    pub fee: String,
    #[serde(default, deserialize_with = "display_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "display_string")]
    pub status: String,
}

fn first_non_empty(preferred: String, fallback: String) -> String {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(display_value).unwrap_or_default())
}

/// Render a JSON value as display text.
///
/// Objects collapse to their `hash`, `value` or `name` member when present
/// (address and fee objects), otherwise to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => ["hash", "value", "name"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(display_value)
            .unwrap_or_else(|| value.to_string()),
        Value::Array(_) => value.to_string(),
    }
}
