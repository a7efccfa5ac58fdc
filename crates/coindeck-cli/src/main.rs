//! Coindeck CLI - Drive the wallet dashboard core from a terminal
//!
//! Every command runs the real core components against simulated wallet and
//! camera capabilities; `copy` uses the terminal clipboard (OSC 52).
//!
//! # Usage
//!
//! ```bash
//! # Payment request for $100 at 65000 USD/BTC
//! coindeck quote --address bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh --fiat 100 --rate 65000 --qr
//!
//! # Balances on another chain
//! coindeck balances --chain ethereum
//!
//! # Leave the scan screen before the permission prompt resolves
//! coindeck scan --stop-early
//!
//! # Environment overrides
//! COINDECK__CLIPBOARD__FEEDBACK_WINDOW_MS=500 coindeck copy bc1q... --wait
//! ```

mod clipboard;
mod commands;
mod config;
mod demo;
mod display;

use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::{balances, copy, quote, scan};
use crate::config::DashboardConfig;
use crate::demo::CameraBehavior;

const SAMPLE_ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

/// Coindeck - wallet dashboard core
#[derive(Parser)]
#[command(name = "coindeck")]
#[command(author = "Coindeck Contributors")]
#[command(version)]
#[command(about = "Payment quotes, balances, QR scans and clipboard feedback", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, global = true, env = "COINDECK_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "COINDECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true, env = "COINDECK_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a fiat amount into a crypto payment request
    Quote {
        /// Receiving address
        #[arg(short, long, default_value = SAMPLE_ADDRESS)]
        address: String,

        /// Fiat amount
        #[arg(short, long)]
        fiat: String,

        /// Exchange rate (fiat per unit of the asset)
        #[arg(short, long)]
        rate: String,

        /// Asset symbol
        #[arg(long, default_value = "BTC")]
        asset: String,

        /// Also render the address QR code in the terminal
        #[arg(long)]
        qr: bool,
    },

    /// Load balances from the simulated wallet
    Balances {
        /// Switch to this chain first
        #[arg(long)]
        chain: Option<String>,

        /// Simulate a disconnected wallet
        #[arg(long)]
        disconnected: bool,

        /// Make the provider fail with this reason
        #[arg(long)]
        fail: Option<String>,
    },

    /// Run a QR scan session against the simulated camera
    Scan {
        /// Deny camera permission
        #[arg(long, conflicts_with = "busy")]
        deny: bool,

        /// Report the camera as in use
        #[arg(long)]
        busy: bool,

        /// Payload the simulated decoder recognises
        #[arg(long, default_value = SAMPLE_ADDRESS)]
        payload: String,

        /// Permission prompt delay in ms
        #[arg(long, default_value = "400")]
        prompt_ms: u64,

        /// Leave the scan screen before the prompt resolves
        #[arg(long)]
        stop_early: bool,
    },

    /// Copy a value to the terminal clipboard
    Copy {
        /// Value to copy
        value: String,

        /// Wait until the "copied" indicator clears
        #[arg(long)]
        wait: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_logging(&config.logging)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "coindeck starting");

    match cli.command {
        Commands::Quote {
            address,
            fiat,
            rate,
            asset,
            qr,
        } => {
            quote::run_quote(&config, &address, &fiat, &rate, &asset, qr)?;
        }
        Commands::Balances {
            chain,
            disconnected,
            fail,
        } => {
            balances::run_balances(&config, chain, disconnected, fail).await?;
        }
        Commands::Scan {
            deny,
            busy,
            payload,
            prompt_ms,
            stop_early,
        } => {
            let behavior = if deny {
                CameraBehavior::Deny
            } else if busy {
                CameraBehavior::Busy
            } else {
                CameraBehavior::Grant
            };
            scan::run_scan(scan::ScanOptions {
                behavior,
                prompt_delay: Duration::from_millis(prompt_ms),
                payload,
                stop_early,
            })
            .await?;
        }
        Commands::Copy { value, wait } => {
            copy::run_copy(&config, &value, wait).await?;
        }
        Commands::Config => {
            display::section("Configuration");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout stays clean for command output and OSC 52.
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
