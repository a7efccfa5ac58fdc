//! Quote command - Fiat to crypto payment request

use crate::config::DashboardConfig;
use crate::display;
use anyhow::Context;
use coindeck_core::{PaymentQuote, PaymentQuoteCalculator, QrRenderService};
use colored::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Build and print a payment request
pub fn run_quote(
    config: &DashboardConfig,
    address: &str,
    fiat: &str,
    rate: &str,
    asset: &str,
    show_qr: bool,
) -> anyhow::Result<()> {
    let fiat_amount = Decimal::from_str(fiat.trim())
        .with_context(|| format!("fiat amount '{fiat}' is not a decimal"))?;
    let exchange_rate = Decimal::from_str(rate.trim())
        .with_context(|| format!("exchange rate '{rate}' is not a decimal"))?;

    let qr = QrRenderService::new(config.qr.clone());
    let calculator = PaymentQuoteCalculator::new(qr.clone());
    let quote = PaymentQuote::new(address, fiat_amount, exchange_rate, asset)?;
    let request = calculator.request(quote)?;

    display::section("Payment Request");
    display::kv("Address", &request.quote.receiving_address);
    display::kv("Fiat amount", &request.quote.fiat_amount.to_string());
    display::kv(
        "Rate",
        &format!("{} per {}", request.quote.exchange_rate, request.quote.asset_symbol),
    );
    println!();
    println!(
        "  {} {} {}",
        "Pay".bright_white().bold(),
        request.crypto_amount.bright_green().bold(),
        request.quote.asset_symbol.bright_yellow()
    );
    println!();
    display::kv("QR image", &request.qr_image_url);

    if show_qr {
        println!();
        println!("{}", qr.render_terminal(&request.quote.receiving_address)?);
    }

    Ok(())
}
