//! Payment quote input

use crate::{CoindeckError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fiat-denominated payment request for a receiving address
///
/// Construction validates the inputs: the address must be non-empty and both
/// the fiat amount and the exchange rate must be strictly positive. The crypto
/// amount is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    /// Address the payer sends to
    pub receiving_address: String,
    /// Requested amount in fiat (never rounded)
    pub fiat_amount: Decimal,
    /// Fiat price of one unit of the asset
    pub exchange_rate: Decimal,
    /// Asset ticker the payer sends
    pub asset_symbol: String,
}

impl PaymentQuote {
    pub fn new(
        receiving_address: impl Into<String>,
        fiat_amount: Decimal,
        exchange_rate: Decimal,
        asset_symbol: impl Into<String>,
    ) -> Result<Self> {
        let receiving_address = receiving_address.into();
        if receiving_address.trim().is_empty() {
            return Err(CoindeckError::MissingAddress);
        }
        if fiat_amount <= Decimal::ZERO {
            return Err(CoindeckError::invalid_amount(fiat_amount));
        }
        CoindeckError::check_rate(exchange_rate)?;

        Ok(Self {
            receiving_address,
            fiat_amount,
            exchange_rate,
            asset_symbol: asset_symbol.into(),
        })
    }
}
