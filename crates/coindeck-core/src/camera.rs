//! Camera session for QR scanning
//!
//! A [`CameraSession`] owns at most one capture handle. The handle is wrapped
//! in a guard that releases the device when dropped, so every exit path
//! (`stop()`, a decoded payload, a device error, dropping the session) gives
//! the device back exactly once.
//!
//! ```text
//! Idle ──start()──→ Requesting ──granted──→ Active ──stop() | decode──→ Stopped
//!                       │                     └──device error──→ Error
//!                       └──denied | busy──→ Denied
//! ```
//!
//! A `stop()` issued while the device is still being acquired supersedes the
//! acquisition: when it completes, the handle is released immediately instead
//! of being stored.

use crate::notify::NotificationSink;
use async_trait::async_trait;
use chrono::Utc;
use coindeck_types::{CoindeckError, DashboardEvent};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("scan session stopped before the camera was acquired")]
    Cancelled,
    #[error("camera acquisition already in progress")]
    AcquisitionInProgress,
}

impl From<ScanError> for CoindeckError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::PermissionDenied => CoindeckError::PermissionDenied,
            ScanError::DeviceUnavailable(reason) => CoindeckError::DeviceUnavailable { reason },
            ScanError::Cancelled => CoindeckError::ScanCancelled,
            ScanError::AcquisitionInProgress => CoindeckError::AcquisitionInProgress,
        }
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Video capture capability (platform camera API)
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Request permission and open a video stream
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, ScanError>;
}

/// An open video stream
pub trait CaptureStream: Send {
    /// Stop the stream and give the device back
    fn release(&mut self);
}

/// Exclusively owned capture handle; releases on drop
struct CaptureHandle {
    stream: Box<dyn CaptureStream>,
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.stream.release();
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Lifecycle of a scan session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanState {
    Idle,
    Requesting,
    Active,
    Stopped,
    Denied,
    Error,
}

struct SessionInner {
    state: ScanState,
    handle: Option<CaptureHandle>,
    /// Bumped by every start and every release path; an acquisition whose
    /// attempt no longer matches has been superseded.
    attempt: u64,
    in_flight: bool,
}

/// Called with the decoded payload, at most once per successful scan
pub type DecodeCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Scoped owner of a capture device for one scan screen
pub struct CameraSession {
    id: Uuid,
    device: Arc<dyn CameraDevice>,
    sink: Arc<dyn NotificationSink>,
    on_decode: DecodeCallback,
    inner: Mutex<SessionInner>,
}

impl CameraSession {
    pub fn new(
        device: Arc<dyn CameraDevice>,
        sink: Arc<dyn NotificationSink>,
        on_decode: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            device,
            sink,
            on_decode: Box::new(on_decode),
            inner: Mutex::new(SessionInner {
                state: ScanState::Idle,
                handle: None,
                attempt: 0,
                in_flight: false,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> ScanState {
        self.inner.lock().state
    }

    pub fn is_active(&self) -> bool {
        let inner = self.inner.lock();
        inner.state == ScanState::Active && inner.handle.is_some()
    }

    /// Acquire the camera
    ///
    /// A no-op when already `Active`. Denial and busy devices are reported,
    /// never retried. If `stop()` runs while the device is being acquired the
    /// acquired handle is released straight away and `Cancelled` is returned.
    pub async fn start(&self) -> Result<(), ScanError> {
        let attempt = {
            let mut inner = self.inner.lock();
            if inner.state == ScanState::Active {
                return Ok(());
            }
            if inner.in_flight {
                return Err(ScanError::AcquisitionInProgress);
            }
            inner.attempt += 1;
            inner.in_flight = true;
            inner.state = ScanState::Requesting;
            inner.attempt
        };
        tracing::debug!(session = %self.id, attempt, "requesting camera");

        let mut pending = PendingAcquire {
            session: self,
            attempt,
            armed: true,
        };
        let outcome = self.device.acquire().await;
        pending.armed = false;

        let mut inner = self.inner.lock();
        inner.in_flight = false;
        let superseded = inner.attempt != attempt;

        match outcome {
            Ok(stream) => {
                let handle = CaptureHandle { stream };
                if superseded {
                    drop(inner);
                    drop(handle);
                    tracing::info!(session = %self.id, "scan stopped during acquisition, camera released");
                    return Err(ScanError::Cancelled);
                }
                inner.handle = Some(handle);
                inner.state = ScanState::Active;
                drop(inner);
                tracing::info!(session = %self.id, "camera active");
                Ok(())
            }
            Err(err) => {
                if superseded {
                    // Stop already moved the session on; only report
                    return Err(err);
                }
                inner.state = match err {
                    ScanError::PermissionDenied | ScanError::DeviceUnavailable(_) => ScanState::Denied,
                    _ => ScanState::Error,
                };
                drop(inner);

                tracing::warn!(session = %self.id, error = %err, "camera acquisition failed");
                self.sink.notify(self.failure_event(&err));
                Err(err)
            }
        }
    }

    /// Release the camera; safe to call in any state, any number of times
    pub fn stop(&self) {
        let released = {
            let mut inner = self.inner.lock();
            if inner.state == ScanState::Idle
                || (inner.state == ScanState::Stopped && inner.handle.is_none())
            {
                return;
            }
            inner.attempt += 1;
            inner.state = ScanState::Stopped;
            inner.handle.take()
        };
        let was_open = released.is_some();
        drop(released);
        tracing::info!(session = %self.id, released = was_open, "scan session stopped");
    }

    /// Hand a decoded payload to the session
    ///
    /// Only the first decode of an active session is delivered; it stops the
    /// session and fires the decode callback. Returns whether it was delivered.
    pub fn deliver_decoded(&self, payload: &str) -> bool {
        let released = {
            let mut inner = self.inner.lock();
            if inner.state != ScanState::Active {
                return false;
            }
            inner.attempt += 1;
            inner.state = ScanState::Stopped;
            inner.handle.take()
        };
        drop(released);

        tracing::info!(session = %self.id, "payload decoded");
        (self.on_decode)(payload);
        self.sink.notify(DashboardEvent::AddressScanned {
            session_id: self.id,
            payload: payload.to_string(),
            timestamp: Utc::now(),
        });
        true
    }

    /// Report an unexpected device failure while active
    ///
    /// Moves the session to `Error` and releases the handle. Returns whether
    /// the session was active.
    pub fn report_device_error(&self, reason: &str) -> bool {
        let released = {
            let mut inner = self.inner.lock();
            if inner.state != ScanState::Active {
                return false;
            }
            inner.attempt += 1;
            inner.state = ScanState::Error;
            inner.handle.take()
        };
        drop(released);

        tracing::warn!(session = %self.id, reason, "camera failed while active");
        self.sink.notify(DashboardEvent::ScanFailed {
            session_id: self.id,
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
        true
    }

    fn failure_event(&self, err: &ScanError) -> DashboardEvent {
        let timestamp = Utc::now();
        match err {
            ScanError::PermissionDenied => DashboardEvent::ScanPermissionDenied {
                session_id: self.id,
                timestamp,
            },
            ScanError::DeviceUnavailable(reason) => DashboardEvent::ScanDeviceUnavailable {
                session_id: self.id,
                reason: reason.clone(),
                timestamp,
            },
            other => DashboardEvent::ScanFailed {
                session_id: self.id,
                reason: other.to_string(),
                timestamp,
            },
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if let Some(handle) = inner.handle.take() {
            drop(handle);
            tracing::debug!(session = %self.id, "scan session dropped, camera released");
        }
    }
}

/// Restores the session if a `start()` future is dropped mid-acquisition
struct PendingAcquire<'a> {
    session: &'a CameraSession,
    attempt: u64,
    armed: bool,
}

impl Drop for PendingAcquire<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.session.inner.lock();
        inner.in_flight = false;
        if inner.attempt == self.attempt && inner.state == ScanState::Requesting {
            inner.attempt += 1;
            inner.state = ScanState::Stopped;
        }
        tracing::debug!(session = %self.session.id, "camera acquisition abandoned");
    }
}
