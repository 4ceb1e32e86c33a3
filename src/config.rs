//! Configuration types for card-value

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub ebay: EbayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Valuation engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Lowest mock base price when no market data exists
    #[serde(default = "default_mock_price_min")]
    pub mock_price_min: Decimal,

    /// Highest mock base price when no market data exists
    #[serde(default = "default_mock_price_max")]
    pub mock_price_max: Decimal,
}

fn default_mock_price_min() -> Decimal {
    dec!(5)
}
fn default_mock_price_max() -> Decimal {
    dec!(500)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mock_price_min: default_mock_price_min(),
            mock_price_max: default_mock_price_max(),
        }
    }
}

/// Recency window for the confidence score
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfidenceConfig {
    /// Sales at most this many days old get full recency credit
    #[serde(default = "default_fresh_days")]
    pub fresh_days: u32,

    /// Sales at least this many days old get none
    #[serde(default = "default_stale_days")]
    pub stale_days: u32,
}

fn default_fresh_days() -> u32 {
    30
}
fn default_stale_days() -> u32 {
    180
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            fresh_days: default_fresh_days(),
            stale_days: default_stale_days(),
        }
    }
}

/// eBay Finding API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EbayConfig {
    /// Application ID; fetching is skipped when absent
    #[serde(default)]
    pub app_id: Option<String>,

    /// Use the sandbox endpoint
    #[serde(default)]
    pub sandbox: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Completed listings requested per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Endpoint override, mainly for local testing
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_max_results() -> u32 {
    50
}

impl Default for EbayConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            sandbox: false,
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            base_url: None,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and check configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.engine.mock_price_min > Decimal::ZERO,
            "engine.mock_price_min must be positive"
        );
        anyhow::ensure!(
            self.engine.mock_price_min <= self.engine.mock_price_max,
            "engine.mock_price_min must not exceed engine.mock_price_max"
        );
        anyhow::ensure!(
            self.confidence.fresh_days < self.confidence.stale_days,
            "confidence.fresh_days must be less than confidence.stale_days"
        );
        Ok(())
    }
}
