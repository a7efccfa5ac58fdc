//! Error types for Coindeck
//!
//! Every failure is explicit. Camera and fetch errors are turned into
//! observable component state; quote errors are returned synchronously.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for Coindeck operations
pub type Result<T> = std::result::Result<T, CoindeckError>;

/// Coindeck error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoindeckError {
    // ========================================================================
    // Quote Errors
    // ========================================================================

    /// Exchange rate is zero, negative or unparseable
    #[error("Invalid exchange rate: {rate}")]
    InvalidRate { rate: String },

    /// Fiat amount is negative or unparseable
    #[error("Invalid fiat amount: {amount}")]
    InvalidAmount { amount: String },

    /// Receiving address is missing
    #[error("Receiving address must not be empty")]
    MissingAddress,

    /// Amount overflow during division
    #[error("Amount overflow during arithmetic operation")]
    AmountOverflow,

    // ========================================================================
    // Camera Errors
    // ========================================================================

    /// Camera permission was denied
    #[error("Camera permission denied")]
    PermissionDenied,

    /// Camera is busy or missing
    #[error("Camera device unavailable: {reason}")]
    DeviceUnavailable { reason: String },

    /// The scan session was stopped while the device was being acquired
    #[error("Scan session stopped before the camera was acquired")]
    ScanCancelled,

    /// An acquisition is already in flight for this session
    #[error("Camera acquisition already in progress")]
    AcquisitionInProgress,

    // ========================================================================
    // Wallet Provider Errors
    // ========================================================================

    /// Balance fetch failed
    #[error("Balance fetch failed: {reason}")]
    FetchFailed { reason: String },

    /// Wallet provider is not connected
    #[error("Wallet provider is not connected")]
    NotConnected,

    /// Chain switch was rejected by the provider
    #[error("Switching to chain {chain_id} failed: {reason}")]
    ChainSwitchFailed { chain_id: String, reason: String },

    // ========================================================================
    // Clipboard / QR Errors
    // ========================================================================

    /// Clipboard capability missing (e.g. insecure context, no terminal)
    #[error("Clipboard unavailable: {reason}")]
    ClipboardUnavailable { reason: String },

    /// Data could not be encoded as a QR code
    #[error("QR encode error: {reason}")]
    QrEncode { reason: String },
}

impl CoindeckError {
    /// Create an invalid rate error
    pub fn invalid_rate(rate: impl ToString) -> Self {
        Self::InvalidRate {
            rate: rate.to_string(),
        }
    }

    /// Create an invalid amount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        Self::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a fetch failure
    pub fn fetch_failed(reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            reason: reason.into(),
        }
    }

    /// Create a clipboard failure
    pub fn clipboard_unavailable(reason: impl Into<String>) -> Self {
        Self::ClipboardUnavailable {
            reason: reason.into(),
        }
    }

    /// Check the rate precondition shared by every quote path
    pub fn check_rate(rate: Decimal) -> Result<()> {
        if rate <= Decimal::ZERO {
            return Err(Self::invalid_rate(rate));
        }
        Ok(())
    }

    /// Get a stable error code for the notification surface
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRate { .. } => "INVALID_RATE",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::MissingAddress => "MISSING_ADDRESS",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::DeviceUnavailable { .. } => "DEVICE_UNAVAILABLE",
            Self::ScanCancelled => "SCAN_CANCELLED",
            Self::AcquisitionInProgress => "ACQUISITION_IN_PROGRESS",
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::NotConnected => "NOT_CONNECTED",
            Self::ChainSwitchFailed { .. } => "CHAIN_SWITCH_FAILED",
            Self::ClipboardUnavailable { .. } => "CLIPBOARD_UNAVAILABLE",
            Self::QrEncode { .. } => "QR_ENCODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = CoindeckError::fetch_failed("timeout");
        assert_eq!(err.error_code(), "FETCH_FAILED");
        assert_eq!(err.to_string(), "Balance fetch failed: timeout");
    }

    #[test]
    fn test_check_rate() {
        assert!(CoindeckError::check_rate(dec!(65000)).is_ok());
        assert_eq!(
            CoindeckError::check_rate(dec!(0)),
            Err(CoindeckError::InvalidRate { rate: "0".to_string() })
        );
        assert!(CoindeckError::check_rate(dec!(-1)).is_err());
    }
}
