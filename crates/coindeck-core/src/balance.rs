//! Balance loading with last-request-wins semantics
//!
//! Every `load()` takes a fresh request token. A completion is applied only if
//! its token is still the latest one, so a slow early fetch can never
//! overwrite the result of a later one. Issuing a token and applying a result
//! both happen inside the watch channel's modify closure, which makes the
//! check-then-apply step atomic with respect to other loads.

use crate::notify::NotificationSink;
use crate::provider::WalletProvider;
use chrono::Utc;
use coindeck_types::{Balance, CoindeckError, DashboardEvent, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Observable balance view state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Nothing requested yet
    Idle,
    /// No wallet connected; nothing is fetched
    NotConnected,
    Loading,
    Loaded { balances: Vec<Balance> },
    Failed { reason: String },
}

impl BalanceStatus {
    pub fn balances(&self) -> Option<&[Balance]> {
        match self {
            Self::Loaded { balances } => Some(balances),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Fetches balances from the wallet provider for the balances view
pub struct BalanceLoader {
    provider: Arc<dyn WalletProvider>,
    sink: Arc<dyn NotificationSink>,
    latest: AtomicU64,
    state: watch::Sender<BalanceStatus>,
}

impl BalanceLoader {
    pub fn new(provider: Arc<dyn WalletProvider>, sink: Arc<dyn NotificationSink>) -> Self {
        let (state, _) = watch::channel(BalanceStatus::Idle);
        Self {
            provider,
            sink,
            latest: AtomicU64::new(0),
            state,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        self.state.borrow().clone()
    }

    /// Observe status changes
    pub fn subscribe(&self) -> watch::Receiver<BalanceStatus> {
        self.state.subscribe()
    }

    /// Load balances for the current connection state
    ///
    /// With `connected == false` the status becomes `NotConnected` and the
    /// provider is not called. Otherwise the status becomes `Loading` and the
    /// fetch result is applied only if no later `load()` (or `cancel()`) has
    /// been issued in the meantime.
    pub async fn load(&self, connected: bool) {
        let token = self.issue(if connected {
            BalanceStatus::Loading
        } else {
            BalanceStatus::NotConnected
        });

        if !connected {
            tracing::debug!(token, "wallet not connected, skipping balance fetch");
            return;
        }

        tracing::debug!(token, "fetching balances");
        let result = self.provider.get_balances().await;
        self.apply(token, result);
    }

    /// Re-fetch using the provider's own connection flag
    pub async fn refresh(&self) {
        self.load(self.provider.is_connected()).await
    }

    /// Switch chain, then reload balances for it
    ///
    /// A rejected switch leaves the current status untouched.
    pub async fn switch_chain(&self, chain_id: &str) -> Result<()> {
        if !self.provider.is_connected() {
            return Err(CoindeckError::NotConnected);
        }
        self.provider.switch_chain(chain_id).await.map_err(|e| {
            tracing::warn!(chain_id, error = %e, "chain switch rejected");
            match e {
                CoindeckError::ChainSwitchFailed { .. } => e,
                other => CoindeckError::ChainSwitchFailed {
                    chain_id: chain_id.to_string(),
                    reason: other.to_string(),
                },
            }
        })?;
        tracing::info!(chain_id, "chain switched");
        self.load(true).await;
        Ok(())
    }

    /// Invalidate any in-flight fetch (view torn down or hidden)
    ///
    /// A `Loading` status falls back to `Idle`; settled results are kept.
    pub fn cancel(&self) {
        self.state.send_if_modified(|status| {
            self.latest.fetch_add(1, Ordering::SeqCst);
            if status.is_loading() {
                *status = BalanceStatus::Idle;
                return true;
            }
            false
        });
        tracing::debug!("pending balance fetch cancelled");
    }

    fn issue(&self, status: BalanceStatus) -> u64 {
        let mut token = 0;
        self.state.send_modify(|current| {
            token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *current = status;
        });
        token
    }

    fn apply(&self, token: u64, result: Result<Vec<Balance>>) {
        let mut event = None;
        let applied = self.state.send_if_modified(|status| {
            if self.latest.load(Ordering::SeqCst) != token {
                return false;
            }
            *status = match &result {
                Ok(balances) => {
                    event = Some(DashboardEvent::BalancesLoaded {
                        asset_count: balances.len(),
                        timestamp: Utc::now(),
                    });
                    BalanceStatus::Loaded {
                        balances: balances.clone(),
                    }
                }
                Err(e) => {
                    event = Some(DashboardEvent::BalanceLoadFailed {
                        reason: e.to_string(),
                        timestamp: Utc::now(),
                    });
                    BalanceStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            true
        });

        if !applied {
            tracing::debug!(token, "discarding stale balance result");
            return;
        }
        match &result {
            Ok(balances) => tracing::info!(token, assets = balances.len(), "balances loaded"),
            Err(e) => tracing::warn!(token, error = %e, "balance fetch failed"),
        }
        if let Some(event) = event {
            self.sink.notify(event);
        }
    }
}
