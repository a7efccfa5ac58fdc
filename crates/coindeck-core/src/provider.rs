//! Wallet provider capability

use async_trait::async_trait;
use coindeck_types::{Balance, Result};

/// External wallet provider supplying chain selection and balance data
///
/// The core treats this as an opaque async capability. Failures surface as
/// [`crate::BalanceStatus::Failed`].
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is currently connected
    fn is_connected(&self) -> bool;

    /// Fetch the current balance snapshot
    async fn get_balances(&self) -> Result<Vec<Balance>>;

    /// Switch the active chain
    async fn switch_chain(&self, chain_id: &str) -> Result<()>;
}
