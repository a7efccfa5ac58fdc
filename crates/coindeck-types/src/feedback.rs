//! Clipboard feedback state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual "copied" state of one address-display surface
///
/// `copied_at` is set when a copy succeeds and cleared when the feedback
/// window elapses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFeedbackState {
    /// Last value written to the clipboard
    pub value: String,
    /// When the copy happened, while the window is open
    pub copied_at: Option<DateTime<Utc>>,
}

impl CopyFeedbackState {
    pub fn copied(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            copied_at: Some(Utc::now()),
        }
    }

    /// Whether the "copied" indicator should be shown
    pub fn is_copied(&self) -> bool {
        self.copied_at.is_some()
    }
}
