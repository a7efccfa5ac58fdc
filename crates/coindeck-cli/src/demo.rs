//! Simulated capabilities for driving the core from a terminal
//!
//! Balances are fixed per chain and valued at fixed rates. The camera grants,
//! denies or reports busy after a permission prompt delay.

use async_trait::async_trait;
use coindeck_core::{
    Balance, CameraDevice, CaptureStream, CoindeckError, Result, ScanError, WalletProvider,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wallet provider backed by static holdings
pub struct SimulatedWallet {
    chain: Mutex<String>,
    connected: bool,
    fail_with: Option<String>,
    latency: Duration,
    fiat_symbol: String,
}

impl SimulatedWallet {
    pub fn new(chain_id: impl Into<String>, latency: Duration, fiat_symbol: impl Into<String>) -> Self {
        Self {
            chain: Mutex::new(chain_id.into()),
            connected: true,
            fail_with: None,
            latency,
            fiat_symbol: fiat_symbol.into(),
        }
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    pub fn chain(&self) -> String {
        self.chain.lock().clone()
    }

    /// Holdings as (symbol, amount, unit price) for a chain
    fn holdings(chain_id: &str) -> Option<Vec<(&'static str, Decimal, Decimal)>> {
        let rows = match chain_id {
            "bitcoin" => vec![("BTC", Decimal::new(4_250_000, 8), Decimal::new(65_000, 0))],
            "ethereum" => vec![
                ("ETH", Decimal::new(1_820, 3), Decimal::new(3_400, 0)),
                ("USDC", Decimal::new(125_050, 2), Decimal::ONE),
            ],
            "solana" => vec![("SOL", Decimal::new(425, 1), Decimal::new(150, 0))],
            _ => return None,
        };
        Some(rows)
    }

    pub fn supported_chains() -> &'static [&'static str] {
        &["bitcoin", "ethereum", "solana"]
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        tokio::time::sleep(self.latency).await;
        if !self.connected {
            return Err(CoindeckError::NotConnected);
        }
        if let Some(reason) = &self.fail_with {
            return Err(CoindeckError::fetch_failed(reason.clone()));
        }

        let chain = self.chain();
        let rows = Self::holdings(&chain)
            .ok_or_else(|| CoindeckError::fetch_failed(format!("no holdings on {chain}")))?;
        Ok(rows
            .into_iter()
            .map(|(symbol, amount, price)| Balance::new(symbol, amount, amount * price, &self.fiat_symbol))
            .collect())
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<()> {
        tokio::time::sleep(self.latency / 2).await;
        if Self::holdings(chain_id).is_none() {
            return Err(CoindeckError::ChainSwitchFailed {
                chain_id: chain_id.to_string(),
                reason: "unsupported chain".to_string(),
            });
        }
        *self.chain.lock() = chain_id.to_string();
        Ok(())
    }
}

/// How the simulated camera answers an acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraBehavior {
    #[default]
    Grant,
    Deny,
    Busy,
}

/// Camera that answers after a permission prompt delay
pub struct SimulatedCamera {
    behavior: CameraBehavior,
    prompt_delay: Duration,
    open_streams: Arc<AtomicUsize>,
}

impl SimulatedCamera {
    pub fn new(behavior: CameraBehavior, prompt_delay: Duration) -> Self {
        Self {
            behavior,
            prompt_delay,
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Streams acquired and not yet released
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }
}

struct SimulatedStream {
    open_streams: Arc<AtomicUsize>,
}

impl CaptureStream for SimulatedStream {
    fn release(&mut self) {
        self.open_streams.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("simulated camera stream released");
    }
}

#[async_trait]
impl CameraDevice for SimulatedCamera {
    async fn acquire(&self) -> std::result::Result<Box<dyn CaptureStream>, ScanError> {
        tokio::time::sleep(self.prompt_delay).await;
        match self.behavior {
            CameraBehavior::Deny => Err(ScanError::PermissionDenied),
            CameraBehavior::Busy => Err(ScanError::DeviceUnavailable(
                "device is in use by another application".to_string(),
            )),
            CameraBehavior::Grant => {
                self.open_streams.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(SimulatedStream {
                    open_streams: Arc::clone(&self.open_streams),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coindeck_core::{BalanceLoader, BalanceStatus, CameraSession, NullSink};
    use rust_decimal_macros::dec;

    fn wallet() -> SimulatedWallet {
        SimulatedWallet::new("bitcoin", Duration::ZERO, "$")
    }

    #[tokio::test]
    async fn test_wallet_values_holdings() {
        let balances = wallet().get_balances().await.unwrap();
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].crypto_amount, dec!(0.0425));
        assert_eq!(balances[0].fiat_amount, dec!(2762.5));
    }

    #[tokio::test]
    async fn test_wallet_switches_chain() {
        let wallet = wallet();
        wallet.switch_chain("ethereum").await.unwrap();
        assert_eq!(wallet.chain(), "ethereum");
        assert_eq!(wallet.get_balances().await.unwrap().len(), 2);

        let err = wallet.switch_chain("dogecoin").await.unwrap_err();
        assert_eq!(err.error_code(), "CHAIN_SWITCH_FAILED");
        assert_eq!(wallet.chain(), "ethereum");
    }

    #[tokio::test]
    async fn test_failing_wallet_surfaces_in_loader() {
        let loader = BalanceLoader::new(Arc::new(wallet().failing("rpc down")), Arc::new(NullSink));
        loader.refresh().await;
        assert!(matches!(loader.status(), BalanceStatus::Failed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_camera_stream_closed_after_early_stop() {
        let camera = Arc::new(SimulatedCamera::new(CameraBehavior::Grant, Duration::from_millis(500)));
        let session = Arc::new(CameraSession::new(camera.clone(), Arc::new(NullSink), |_| {}));

        let start = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.start().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.stop();

        assert_eq!(start.await.unwrap(), Err(ScanError::Cancelled));
        assert_eq!(camera.open_streams(), 0);
    }
}
