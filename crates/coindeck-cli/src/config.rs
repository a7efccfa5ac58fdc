//! CLI Configuration
//!
//! Configuration for the Coindeck CLI. Sources, lowest precedence first:
//! `config/default`, `config/local`, an optional file passed with `--config`,
//! then `COINDECK__*` environment variables (`COINDECK__QR__SIZE=300`).

use anyhow::Context;
use coindeck_core::QrServiceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// QR render service
    #[serde(default)]
    pub qr: QrServiceConfig,

    /// Clipboard feedback
    #[serde(default)]
    pub clipboard: ClipboardSettings,

    /// Simulated wallet provider
    #[serde(default)]
    pub wallet: WalletSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Clipboard feedback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardSettings {
    /// How long the "copied" indicator stays on
    #[serde(default = "default_feedback_window")]
    pub feedback_window_ms: u64,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            feedback_window_ms: default_feedback_window(),
        }
    }
}

impl ClipboardSettings {
    pub fn feedback_window(&self) -> Duration {
        Duration::from_millis(self.feedback_window_ms)
    }
}

/// Simulated wallet settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Chain selected at startup
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Artificial provider latency in ms
    #[serde(default = "default_latency")]
    pub latency_ms: u64,

    /// Fiat currency symbol for balance valuation
    #[serde(default = "default_fiat_symbol")]
    pub fiat_currency_symbol: String,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            latency_ms: default_latency(),
            fiat_currency_symbol: default_fiat_symbol(),
        }
    }
}

impl WalletSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_feedback_window() -> u64 {
    2000
}

fn default_chain_id() -> String {
    "bitcoin".to_string()
}

fn default_latency() -> u64 {
    300
}

fn default_fiat_symbol() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl DashboardConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("."), config_path)
    }

    /// Load with the default locations resolved under `base_dir`
    fn load_from(base_dir: &Path, config_path: Option<&str>) -> anyhow::Result<Self> {
        let default = base_dir.join("config").join("default");
        let local = base_dir.join("config").join("local");

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(&default.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&local.to_string_lossy()).required(false));

        // An explicit file wins over the default locations
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("COINDECK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("failed to read configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration")
    }
}
