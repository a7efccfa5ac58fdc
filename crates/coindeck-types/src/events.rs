//! Dashboard events for the notification surface
//!
//! Components emit these through an injected sink; the UI layer decides how
//! (and whether) to render them. No user-facing strings are formatted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Semantic events emitted by the dashboard core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// A value was written to the clipboard
    AddressCopied {
        value: String,
        timestamp: DateTime<Utc>,
    },

    /// Camera permission was refused
    ScanPermissionDenied {
        session_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Camera was busy or missing
    ScanDeviceUnavailable {
        session_id: Uuid,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Device failed while a scan was active
    ScanFailed {
        session_id: Uuid,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// The decoder produced a payload for the session
    AddressScanned {
        session_id: Uuid,
        payload: String,
        timestamp: DateTime<Utc>,
    },

    /// A balance snapshot was applied
    BalancesLoaded {
        asset_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The wallet provider failed to return balances
    BalanceLoadFailed {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Get the event kind (the serialised `type` tag)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddressCopied { .. } => "AddressCopied",
            Self::ScanPermissionDenied { .. } => "ScanPermissionDenied",
            Self::ScanDeviceUnavailable { .. } => "ScanDeviceUnavailable",
            Self::ScanFailed { .. } => "ScanFailed",
            Self::AddressScanned { .. } => "AddressScanned",
            Self::BalancesLoaded { .. } => "BalancesLoaded",
            Self::BalanceLoadFailed { .. } => "BalanceLoadFailed",
        }
    }

    /// Whether the UI should render this as an error toast
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ScanPermissionDenied { .. }
                | Self::ScanDeviceUnavailable { .. }
                | Self::ScanFailed { .. }
                | Self::BalanceLoadFailed { .. }
        )
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::AddressCopied { timestamp, .. }
            | Self::ScanPermissionDenied { timestamp, .. }
            | Self::ScanDeviceUnavailable { timestamp, .. }
            | Self::ScanFailed { timestamp, .. }
            | Self::AddressScanned { timestamp, .. }
            | Self::BalancesLoaded { timestamp, .. }
            | Self::BalanceLoadFailed { timestamp, .. } => *timestamp,
        }
    }
}
