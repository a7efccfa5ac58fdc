//! Coindeck Types - Domain types for the wallet dashboard core
//!
//! This crate contains the data shared by every dashboard surface, with zero
//! dependencies on other coindeck crates:
//!
//! - Balance snapshots supplied by the wallet provider
//! - Payment quotes (fiat amount, exchange rate, receiving address)
//! - Clipboard feedback state
//! - Semantic dashboard events for the notification surface
//! - The shared error taxonomy
//!
//! # Flow
//!
//! ```text
//! WalletProvider ──→ Balance[] ──→ balances screen
//! PaymentQuote ────→ crypto amount + QR URL ──→ payment screen
//! CameraSession ───→ decoded address ──→ scan screen
//!            all ──→ DashboardEvent ──→ notification sink
//! ```

pub mod balance;
pub mod quote;
pub mod feedback;
pub mod events;
pub mod error;

pub use balance::*;
pub use quote::*;
pub use feedback::*;
pub use events::*;
pub use error::*;

/// Number of fractional digits shown for crypto-denominated amounts
pub const CRYPTO_DISPLAY_DECIMALS: u32 = 8;
