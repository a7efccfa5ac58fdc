//! Terminal clipboard via OSC 52
//!
//! The terminal emulator owns the system clipboard; we ask it to set the
//! selection with an `ESC ] 52 ; c ; <base64> BEL` sequence. Inside tmux the
//! sequence is wrapped in a DCS passthrough.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use coindeck_core::{Clipboard, CoindeckError, Result};
use std::io::{IsTerminal, Write};

/// Writes to the clipboard of the terminal attached to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard {
    tmux: bool,
}

impl Osc52Clipboard {
    pub fn from_env() -> Self {
        Self {
            tmux: std::env::var_os("TMUX").is_some(),
        }
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(CoindeckError::clipboard_unavailable("stdout is not a terminal"));
        }
        let seq = osc52_sequence(text, self.tmux);
        stdout
            .write_all(seq.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| CoindeckError::clipboard_unavailable(e.to_string()))?;
        tracing::debug!(bytes = text.len(), tmux = self.tmux, "osc52 clipboard write");
        Ok(())
    }
}

fn osc52_sequence(text: &str, tmux: bool) -> String {
    let seq = format!("\u{1b}]52;c;{}\u{7}", STANDARD.encode(text.as_bytes()));
    if tmux {
        format!("\u{1b}Ptmux;{}\u{1b}\\", seq.replace('\u{1b}', "\u{1b}\u{1b}"))
    } else {
        seq
    }
}
