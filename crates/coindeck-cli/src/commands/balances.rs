//! Balances command - Load the wallet snapshot

use crate::commands::print_events;
use crate::config::DashboardConfig;
use crate::demo::SimulatedWallet;
use crate::display;
use coindeck_core::{BalanceLoader, BalanceStatus, BroadcastSink};
use std::sync::Arc;

/// Load and print balances from the simulated wallet
pub async fn run_balances(
    config: &DashboardConfig,
    chain: Option<String>,
    disconnected: bool,
    fail: Option<String>,
) -> anyhow::Result<()> {
    let mut wallet = SimulatedWallet::new(
        config.wallet.chain_id.clone(),
        config.wallet.latency(),
        config.wallet.fiat_currency_symbol.clone(),
    );
    if disconnected {
        wallet = wallet.disconnected();
    }
    if let Some(reason) = fail {
        wallet = wallet.failing(reason);
    }
    let wallet = Arc::new(wallet);

    let sink = Arc::new(BroadcastSink::default());
    let mut events = sink.subscribe();
    let loader = BalanceLoader::new(wallet.clone(), sink);

    display::section("Balances");
    match chain {
        Some(chain_id) => {
            display::info(&format!("Switching to {chain_id}..."));
            if let Err(e) = loader.switch_chain(&chain_id).await {
                display::error(&e.to_string());
                display::kv("Supported", &SimulatedWallet::supported_chains().join(", "));
                return Ok(());
            }
        }
        None => loader.refresh().await,
    }
    display::kv("Chain", &wallet.chain());
    println!();

    match loader.status() {
        BalanceStatus::Loaded { balances } => display::balances(&balances),
        BalanceStatus::NotConnected => display::warning("Connect a wallet to see balances"),
        BalanceStatus::Failed { reason } => display::error(&reason),
        BalanceStatus::Idle | BalanceStatus::Loading => display::info("No balances loaded"),
    }

    println!();
    print_events(&mut events);
    Ok(())
}
