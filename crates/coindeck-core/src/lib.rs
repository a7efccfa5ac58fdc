//! Coindeck Core - wallet interaction and payment session runtime
//!
//! The core owns the few dashboard behaviors whose correctness depends on
//! resource lifecycle, ordering or numeric contracts rather than rendering:
//!
//! - [`CameraSession`]: scoped acquisition of a capture device for QR scans
//! - [`BalanceLoader`]: balance fetch with last-issued-wins staleness tokens
//! - [`PaymentQuoteCalculator`]: fiat to crypto conversion at 8 fixed digits
//! - [`ClipboardFeedback`]: copy with a single cancel-and-replace reset timer
//!
//! External capabilities (wallet provider, camera, clipboard, notification
//! surface) are consumed through the traits in [`provider`], [`camera`],
//! [`clipboard`] and [`notify`]. All async components run on tokio.

pub mod balance;
pub mod camera;
pub mod clipboard;
pub mod notify;
pub mod provider;
pub mod qr;
pub mod quote;

pub use balance::{BalanceLoader, BalanceStatus};
pub use camera::{CameraDevice, CameraSession, CaptureStream, ScanError, ScanState};
pub use clipboard::{Clipboard, ClipboardFeedback, DEFAULT_FEEDBACK_WINDOW};
pub use notify::{BroadcastSink, NotificationSink, NullSink};
pub use provider::WalletProvider;
pub use qr::{QrRenderService, QrServiceConfig};
pub use quote::{quote, quote_str, PaymentQuoteCalculator, PaymentRequest};

pub use coindeck_types::*;
