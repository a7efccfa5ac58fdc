//! Display utilities for the CLI

use coindeck_core::{Balance, DashboardEvent};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print a balance snapshot as a table
pub fn balances(balances: &[Balance]) {
    println!(
        "  {:<8} {:>20} {:>16}",
        "ASSET".bright_white().bold(),
        "AMOUNT".bright_white().bold(),
        "VALUE".bright_white().bold()
    );
    for b in balances {
        println!(
            "  {:<8} {:>20} {:>16}",
            b.asset_symbol.bright_yellow(),
            b.crypto_amount.to_string(),
            format!("{}{}", b.fiat_currency_symbol, b.fiat_amount.round_dp(2)).bright_cyan()
        );
    }
    match (Balance::total_fiat(balances), balances.first()) {
        (Some(total), Some(first)) => {
            println!("  {}", "─".repeat(46).bright_black());
            println!(
                "  {:<8} {:>37}",
                "TOTAL".bright_white().bold(),
                format!("{}{}", first.fiat_currency_symbol, total.round_dp(2)).bright_green()
            );
        }
        (None, Some(_)) => warning("Mixed fiat currencies, no total"),
        _ => {}
    }
}

/// Print a dashboard event the way the toast layer would
pub fn event(event: &DashboardEvent) {
    let at = event.timestamp().format("%H:%M:%S%.3f").to_string();
    let marker = if event.is_failure() {
        "●".bright_red()
    } else {
        "●".bright_green()
    };
    println!("  {} {} {}", marker, at.bright_black(), event.kind());
}
