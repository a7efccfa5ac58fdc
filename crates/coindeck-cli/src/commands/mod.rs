//! Command handlers

pub mod balances;
pub mod copy;
pub mod quote;
pub mod scan;

use crate::display;
use coindeck_core::DashboardEvent;
use tokio::sync::broadcast;

/// Print every event already queued on a sink subscription
pub(crate) fn print_events(rx: &mut broadcast::Receiver<DashboardEvent>) {
    while let Ok(event) = rx.try_recv() {
        display::event(&event);
    }
}
