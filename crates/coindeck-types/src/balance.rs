//! Balance snapshots returned by the wallet provider

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One asset line of a wallet balance snapshot
///
/// Produced by the wallet provider and immutable once returned. Within a
/// single snapshot `asset_symbol` is unique. Amounts serialise as decimal
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Asset ticker, e.g. `BTC`
    pub asset_symbol: String,
    /// Holdings in the asset's own unit
    pub crypto_amount: Decimal,
    /// Holdings valued in fiat
    pub fiat_amount: Decimal,
    /// Fiat currency symbol, e.g. `$`
    pub fiat_currency_symbol: String,
}

impl Balance {
    pub fn new(
        asset_symbol: impl Into<String>,
        crypto_amount: Decimal,
        fiat_amount: Decimal,
        fiat_currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            asset_symbol: asset_symbol.into(),
            crypto_amount,
            fiat_amount,
            fiat_currency_symbol: fiat_currency_symbol.into(),
        }
    }

    /// Sum the fiat value of a snapshot
    ///
    /// Returns `None` when the snapshot mixes fiat currencies or overflows.
    pub fn total_fiat(balances: &[Balance]) -> Option<Decimal> {
        let first = balances.first()?;
        balances.iter().try_fold(Decimal::ZERO, |acc, b| {
            if b.fiat_currency_symbol != first.fiat_currency_symbol {
                return None;
            }
            acc.checked_add(b.fiat_amount)
        })
    }

    /// Find an asset line by symbol
    pub fn find<'a>(balances: &'a [Balance], symbol: &str) -> Option<&'a Balance> {
        balances.iter().find(|b| b.asset_symbol == symbol)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}{})",
            self.crypto_amount, self.asset_symbol, self.fiat_currency_symbol, self.fiat_amount
        )
    }
}
