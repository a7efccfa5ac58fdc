//! Notification sinks for dashboard events

use coindeck_types::DashboardEvent;
use tokio::sync::broadcast;

/// Receives semantic events from core components
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: DashboardEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _event: DashboardEvent) {}
}

/// Fans events out to every subscriber (toast layer, logs, tests)
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<DashboardEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(64)
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, event: DashboardEvent) {
        // No subscribers is not an error; the toast layer may not be mounted
        if self.sender.send(event).is_err() {
            tracing::trace!("dashboard event dropped: no subscribers");
        }
    }
}
