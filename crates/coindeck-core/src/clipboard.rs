//! Clipboard copy with time-bounded "copied" feedback
//!
//! Each address-display surface owns one [`ClipboardFeedback`]. A copy writes
//! the value through the [`Clipboard`] capability and opens a feedback window.
//! Copying again inside the window aborts the pending reset and starts a new
//! one, so there is never more than one reset timer per instance. Dropping
//! the instance aborts the timer; the state is never touched afterwards.

use crate::notify::NotificationSink;
use chrono::Utc;
use coindeck_types::{CopyFeedbackState, DashboardEvent, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long the "copied" indicator stays on
pub const DEFAULT_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Write-only system clipboard
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Copy-to-clipboard behavior with a single cancel-and-replace reset timer
///
/// Must be used from within a tokio runtime.
pub struct ClipboardFeedback {
    clipboard: Arc<dyn Clipboard>,
    sink: Arc<dyn NotificationSink>,
    window: Duration,
    state: Arc<watch::Sender<CopyFeedbackState>>,
    generation: Arc<AtomicU64>,
    reset: Option<JoinHandle<()>>,
}

impl ClipboardFeedback {
    pub fn new(clipboard: Arc<dyn Clipboard>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_window(clipboard, sink, DEFAULT_FEEDBACK_WINDOW)
    }

    pub fn with_window(
        clipboard: Arc<dyn Clipboard>,
        sink: Arc<dyn NotificationSink>,
        window: Duration,
    ) -> Self {
        let (state, _) = watch::channel(CopyFeedbackState::default());
        Self {
            clipboard,
            sink,
            window,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            reset: None,
        }
    }

    /// Write `value` to the clipboard and (re)start the feedback window
    ///
    /// A clipboard failure is returned and leaves the current state as is.
    pub fn copy(&mut self, value: &str) -> Result<()> {
        self.clipboard.write_text(value)?;

        if let Some(previous) = self.reset.take() {
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let copied = CopyFeedbackState::copied(value);
        let timestamp = copied.copied_at.unwrap_or_else(Utc::now);
        self.state.send_replace(copied);

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let window = self.window;
        self.reset = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            clear_if_current(&state, &current, generation);
        }));

        tracing::debug!(window_ms = window.as_millis() as u64, "clipboard feedback window started");
        self.sink.notify(DashboardEvent::AddressCopied {
            value: value.to_string(),
            timestamp,
        });
        Ok(())
    }

    /// Current feedback state
    pub fn state(&self) -> CopyFeedbackState {
        self.state.borrow().clone()
    }

    pub fn is_copied(&self) -> bool {
        self.state.borrow().is_copied()
    }

    /// Observe feedback changes (e.g. to re-render the copy button)
    pub fn subscribe(&self) -> watch::Receiver<CopyFeedbackState> {
        self.state.subscribe()
    }

    /// Number of reset timers still pending (0 or 1)
    ///
    /// Only the timer of the latest copy counts; replaced timers are aborted.
    pub fn pending_resets(&self) -> usize {
        self.reset
            .as_ref()
            .map_or(0, |reset| usize::from(!reset.is_finished()))
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Drop for ClipboardFeedback {
    fn drop(&mut self) {
        // A reset already running on another worker sees a stale generation
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(reset) = self.reset.take() {
            reset.abort();
        }
    }
}

/// Close the feedback window if `generation` still owns it
fn clear_if_current(
    state: &watch::Sender<CopyFeedbackState>,
    current: &AtomicU64,
    generation: u64,
) -> bool {
    state.send_if_modified(|s| {
        if current.load(Ordering::SeqCst) != generation || s.copied_at.is_none() {
            return false;
        }
        s.copied_at = None;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{BroadcastSink, NullSink};
    use coindeck_types::CoindeckError;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            self.writes.lock().push(text.to_string());
            Ok(())
        }
    }

    struct MissingClipboard;

    impl Clipboard for MissingClipboard {
        fn write_text(&self, _text: &str) -> Result<()> {
            Err(CoindeckError::clipboard_unavailable("insecure context"))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_flag_and_clears_after_window() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let mut feedback = ClipboardFeedback::new(clipboard.clone(), Arc::new(NullSink));

        feedback.copy("bc1qaddr").unwrap();
        assert!(feedback.is_copied());
        assert_eq!(feedback.state().value, "bc1qaddr");
        assert_eq!(clipboard.writes.lock().as_slice(), ["bc1qaddr"]);

        tokio::time::sleep(ms(1999)).await;
        assert!(feedback.is_copied());

        tokio::time::sleep(ms(2)).await;
        assert!(!feedback.is_copied());
        assert_eq!(feedback.state().value, "bc1qaddr");
        assert_eq!(feedback.pending_resets(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_restarts_window_with_single_timer() {
        let mut feedback =
            ClipboardFeedback::new(Arc::new(RecordingClipboard::default()), Arc::new(NullSink));

        feedback.copy("addr1").unwrap();
        tokio::time::sleep(ms(1500)).await;
        feedback.copy("addr2").unwrap();

        // 2500ms after the first copy, 1000ms after the second
        tokio::time::sleep(ms(1000)).await;
        assert!(feedback.is_copied());
        assert_eq!(feedback.state().value, "addr2");
        assert_eq!(feedback.pending_resets(), 1);

        // 2000ms after the second copy
        tokio::time::sleep(ms(1001)).await;
        assert!(!feedback.is_copied());
        assert_eq!(feedback.pending_resets(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_leaves_one_pending_reset_immediately() {
        let mut feedback =
            ClipboardFeedback::new(Arc::new(RecordingClipboard::default()), Arc::new(NullSink));
        assert_eq!(feedback.pending_resets(), 0);

        feedback.copy("addr1").unwrap();
        feedback.copy("addr2").unwrap();
        assert_eq!(feedback.pending_resets(), 1);

        tokio::task::yield_now().await;
        feedback.copy("addr3").unwrap();
        assert_eq!(feedback.pending_resets(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_racing_teardown_leaves_state() {
        let mut feedback =
            ClipboardFeedback::new(Arc::new(RecordingClipboard::default()), Arc::new(NullSink));
        feedback.copy("addr").unwrap();

        // What a reset already past its sleep holds when the owner is dropped
        let state = Arc::clone(&feedback.state);
        let current = Arc::clone(&feedback.generation);
        let generation = current.load(Ordering::SeqCst);
        drop(feedback);

        assert!(!clear_if_current(&state, &current, generation));
        assert!(state.borrow().is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_reset() {
        let mut feedback =
            ClipboardFeedback::new(Arc::new(RecordingClipboard::default()), Arc::new(NullSink));
        let rx = feedback.subscribe();

        feedback.copy("addr").unwrap();
        drop(feedback);

        tokio::time::sleep(ms(5000)).await;
        assert!(rx.borrow().is_copied(), "state mutated after teardown");
    }

    #[tokio::test]
    async fn test_clipboard_failure_does_not_open_window() {
        let sink = BroadcastSink::default();
        let mut events = sink.subscribe();
        let mut feedback = ClipboardFeedback::new(Arc::new(MissingClipboard), Arc::new(sink));

        let err = feedback.copy("addr").unwrap_err();
        assert_eq!(err.error_code(), "CLIPBOARD_UNAVAILABLE");
        assert!(!feedback.is_copied());
        assert_eq!(feedback.pending_resets(), 0);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_copy_emits_address_copied() {
        let sink = BroadcastSink::default();
        let mut events = sink.subscribe();
        let mut feedback =
            ClipboardFeedback::new(Arc::new(RecordingClipboard::default()), Arc::new(sink));

        feedback.copy("bc1qaddr").unwrap();
        match events.try_recv().unwrap() {
            DashboardEvent::AddressCopied { value, .. } => assert_eq!(value, "bc1qaddr"),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
