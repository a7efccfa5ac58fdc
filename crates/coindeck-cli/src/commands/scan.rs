//! Scan command - Drive a camera session against the simulated camera

use crate::commands::print_events;
use crate::demo::{CameraBehavior, SimulatedCamera};
use crate::display;
use coindeck_core::{BroadcastSink, CameraSession, ScanError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Simulated frames until the decoder recognises the code
const DECODE_DELAY: Duration = Duration::from_millis(250);

/// Options for one scan run
pub struct ScanOptions {
    pub behavior: CameraBehavior,
    pub prompt_delay: Duration,
    pub payload: String,
    /// Leave the scan screen while the permission prompt is still open
    pub stop_early: bool,
}

/// Run a scan session and report what happened to the device
pub async fn run_scan(options: ScanOptions) -> anyhow::Result<()> {
    let camera = Arc::new(SimulatedCamera::new(options.behavior, options.prompt_delay));
    let sink = Arc::new(BroadcastSink::default());
    let mut events = sink.subscribe();

    let scanned = Arc::new(Mutex::new(None::<String>));
    let session = Arc::new(CameraSession::new(camera.clone(), sink, {
        let scanned = Arc::clone(&scanned);
        move |payload: &str| *scanned.lock() = Some(payload.to_string())
    }));

    display::section("QR Scan");
    display::kv("Session", &session.id().to_string());
    display::info("Requesting camera...");

    if options.stop_early {
        let start = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.start().await }
        });
        tokio::time::sleep(options.prompt_delay / 2).await;
        display::info("Leaving scan screen");
        session.stop();

        match start.await? {
            Err(ScanError::Cancelled) => display::success("Camera released after late permission grant"),
            Err(e) => display::warning(&e.to_string()),
            Ok(()) => display::warning("Camera became active before the screen closed"),
        }
        session.stop();
    } else {
        if let Err(e) = session.start().await {
            display::error(&e.to_string());
            println!();
            print_events(&mut events);
            return Ok(());
        }
        display::success("Camera active");

        tokio::time::sleep(DECODE_DELAY).await;
        session.deliver_decoded(&options.payload);
        if let Some(payload) = scanned.lock().as_deref() {
            display::success("Code recognised");
            display::kv("Payload", payload);
        }
    }

    display::kv("State", &format!("{:?}", session.state()));
    display::kv("Open streams", &camera.open_streams().to_string());
    println!();
    print_events(&mut events);
    Ok(())
}
