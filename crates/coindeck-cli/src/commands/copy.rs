//! Copy command - Clipboard write with "copied" feedback

use crate::clipboard::Osc52Clipboard;
use crate::commands::print_events;
use crate::config::DashboardConfig;
use crate::display;
use coindeck_core::{BroadcastSink, ClipboardFeedback};
use colored::*;
use std::sync::Arc;
use std::time::Instant;

/// Copy a value to the terminal clipboard and show the feedback window
pub async fn run_copy(config: &DashboardConfig, value: &str, wait: bool) -> anyhow::Result<()> {
    let sink = Arc::new(BroadcastSink::default());
    let mut events = sink.subscribe();
    let mut feedback = ClipboardFeedback::with_window(
        Arc::new(Osc52Clipboard::from_env()),
        sink,
        config.clipboard.feedback_window(),
    );

    display::section("Copy");
    if let Err(e) = feedback.copy(value) {
        display::error(&e.to_string());
        return Ok(());
    }
    println!("  {} {}", "Address copied".bright_green(), value.bright_cyan());

    if wait {
        let started = Instant::now();
        let mut rx = feedback.subscribe();
        while rx.borrow_and_update().is_copied() {
            rx.changed().await?;
        }
        display::info(&format!(
            "Feedback cleared after {} ms",
            started.elapsed().as_millis()
        ));
    }

    println!();
    print_events(&mut events);
    Ok(())
}
