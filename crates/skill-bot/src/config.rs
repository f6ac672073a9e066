//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Signal configuration
    pub signal: SignalConfig,

    /// Block explorer configuration
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// Memecoin skill configuration
    #[serde(default)]
    pub memecoin: MemecoinConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    /// Signal CLI REST API endpoint
    #[serde(default = "default_signal_service")]
    pub service_url: String,

    /// Bot account phone number
    pub phone_number: String,

    /// Poll interval for messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Request timeout
    #[serde(default = "default_signal_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

/// Which explorer implementation backs the Mode skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorerBackend {
    #[default]
    Live,
    Stub,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub backend: ExplorerBackend,

    /// Blockscout API base URL
    #[serde(default = "default_explorer_api")]
    pub base_url: String,

    /// Explorer website, used for links in replies
    #[serde(default = "default_explorer_web")]
    pub web_url: String,

    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemecoinConfig {
    /// Chain named in launch announcements
    #[serde(default = "default_chain")]
    pub chain: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

// Default implementations
impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend: ExplorerBackend::default(),
            base_url: default_explorer_api(),
            web_url: default_explorer_web(),
            api_key: None,
            timeout: default_timeout(),
        }
    }
}

impl Default for MemecoinConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_signal_service() -> String {
    "http://signal-api:8080".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_signal_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_explorer_api() -> String {
    mode_explorer::DEFAULT_BASE_URL.into()
}

fn default_explorer_web() -> String {
    "https://explorer.mode.network".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_chain() -> String {
    "Starknet".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Keep phone numbers such as +1555... as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_environment(env(&[("SIGNAL__PHONE_NUMBER", "+15555555555")])).unwrap();

        assert_eq!(config.signal.phone_number, "+15555555555");
        assert_eq!(config.signal.service_url, "http://signal-api:8080");
        assert_eq!(config.signal.poll_interval, Duration::from_millis(200));
        assert_eq!(config.explorer.backend, ExplorerBackend::Live);
        assert_eq!(config.explorer.base_url, "https://explorer.mode.network/api/v2");
        assert!(config.explorer.api_key.is_none());
        assert_eq!(config.memecoin.chain, "Starknet");
        assert_eq!(config.bot.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_environment(env(&[
            ("SIGNAL__PHONE_NUMBER", "+15555555555"),
            ("EXPLORER__BACKEND", "stub"),
            ("EXPLORER__TIMEOUT", "3s"),
            ("EXPLORER__API_KEY", "secret"),
            ("BOT__LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.explorer.backend, ExplorerBackend::Stub);
        assert_eq!(config.explorer.timeout, Duration::from_secs(3));
        assert_eq!(
            config.explorer.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("secret")
        );
        assert_eq!(config.bot.log_format, LogFormat::Json);
    }

    #[test]
    fn test_phone_number_required() {
        assert!(Config::from_environment(env(&[("EXPLORER__BACKEND", "stub")])).is_err());
    }
}
