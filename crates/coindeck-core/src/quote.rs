//! Payment quote calculation
//!
//! `crypto_amount = fiat_amount / exchange_rate`, rounded half-even to
//! exactly [`CRYPTO_DISPLAY_DECIMALS`] fractional digits. The value is
//! user-facing financial display, so it is computed in decimal arithmetic and
//! never goes through floating point formatting.

use crate::qr::QrRenderService;
use coindeck_types::{CoindeckError, PaymentQuote, Result, CRYPTO_DISPLAY_DECIMALS};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Convert a fiat amount to a crypto amount string with 8 fractional digits
///
/// Fails with `InvalidRate` when `exchange_rate <= 0` and with
/// `InvalidAmount` when `fiat_amount < 0`. The fiat amount itself is not
/// rounded; only the output is fixed-precision.
pub fn quote(fiat_amount: Decimal, exchange_rate: Decimal) -> Result<String> {
    CoindeckError::check_rate(exchange_rate)?;
    if fiat_amount < Decimal::ZERO {
        return Err(CoindeckError::invalid_amount(fiat_amount));
    }

    let raw = fiat_amount
        .checked_div(exchange_rate)
        .ok_or(CoindeckError::AmountOverflow)?;

    let mut amount = round_quotient(raw, fiat_amount, exchange_rate);
    amount.rescale(CRYPTO_DISPLAY_DECIMALS);
    // rescale silently drops digits when the mantissa cannot hold them
    if amount.scale() != CRYPTO_DISPLAY_DECIMALS {
        return Err(CoindeckError::AmountOverflow);
    }
    if amount.is_zero() {
        amount.set_sign_positive(true);
    }

    Ok(amount.to_string())
}

/// Round `raw = fiat / rate` half-even at the display precision
///
/// The division already rounded to the 28-digit mantissa, which can land an
/// inexact quotient exactly on a midpoint. On a midpoint the product is
/// compared with `fiat` to recover which side the exact quotient lies on.
fn round_quotient(raw: Decimal, fiat: Decimal, rate: Decimal) -> Decimal {
    let truncated = raw.round_dp_with_strategy(CRYPTO_DISPLAY_DECIMALS, RoundingStrategy::ToZero);
    let half_step = Decimal::new(5, CRYPTO_DISPLAY_DECIMALS + 1);

    let strategy = if raw - truncated != half_step {
        RoundingStrategy::MidpointNearestEven
    } else {
        match raw.checked_mul(rate).map(|product| product.cmp(&fiat)) {
            Some(Ordering::Greater) => RoundingStrategy::ToZero,
            Some(Ordering::Less) => RoundingStrategy::AwayFromZero,
            _ => RoundingStrategy::MidpointNearestEven,
        }
    };
    raw.round_dp_with_strategy(CRYPTO_DISPLAY_DECIMALS, strategy)
}

/// Parse user-entered decimal text, then [`quote`]
pub fn quote_str(fiat_amount: &str, exchange_rate: &str) -> Result<String> {
    let fiat = Decimal::from_str(fiat_amount.trim())
        .map_err(|_| CoindeckError::invalid_amount(fiat_amount))?;
    let rate = Decimal::from_str(exchange_rate.trim())
        .map_err(|_| CoindeckError::invalid_rate(exchange_rate))?;
    quote(fiat, rate)
}

/// Everything a payment screen displays for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub quote: PaymentQuote,
    /// Crypto amount, exactly 8 fractional digits
    pub crypto_amount: String,
    /// Render-service URL for the receiving address QR image
    pub qr_image_url: String,
}

/// Composes quotes with the QR render service for payment screens
#[derive(Debug, Clone, Default)]
pub struct PaymentQuoteCalculator {
    qr: QrRenderService,
}

impl PaymentQuoteCalculator {
    pub fn new(qr: QrRenderService) -> Self {
        Self { qr }
    }

    pub fn quote(&self, fiat_amount: Decimal, exchange_rate: Decimal) -> Result<String> {
        quote(fiat_amount, exchange_rate)
    }

    /// Build the display bundle for a validated quote
    pub fn request(&self, quote: PaymentQuote) -> Result<PaymentRequest> {
        let crypto_amount = self::quote(quote.fiat_amount, quote.exchange_rate)?;
        let qr_image_url = self.qr.image_url(&quote.receiving_address);

        tracing::debug!(
            asset = %quote.asset_symbol,
            fiat = %quote.fiat_amount,
            rate = %quote.exchange_rate,
            crypto = %crypto_amount,
            "payment quote computed"
        );

        Ok(PaymentRequest {
            quote,
            crypto_amount,
            qr_image_url,
        })
    }
}
