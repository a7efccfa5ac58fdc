use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use coindeck_core::{
    Balance, BalanceLoader, BalanceStatus, BroadcastSink, CameraDevice, CameraSession,
    CaptureStream, Clipboard, ClipboardFeedback, CoindeckError, DashboardEvent, PaymentQuote,
    PaymentQuoteCalculator, QrRenderService, QrServiceConfig, Result, ScanError, ScanState,
    WalletProvider,
};

const ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

struct CountedStream(Arc<AtomicUsize>);

impl CaptureStream for CountedStream {
    fn release(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Grants access once the test opens the gate
struct SlowCamera {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    released: Arc<AtomicUsize>,
}

#[async_trait]
impl CameraDevice for SlowCamera {
    async fn acquire(&self) -> std::result::Result<Box<dyn CaptureStream>, ScanError> {
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(Box::new(CountedStream(Arc::clone(&self.released))))
    }
}

struct StaticWallet {
    balances: Vec<Balance>,
}

#[async_trait]
impl WalletProvider for StaticWallet {
    fn is_connected(&self) -> bool {
        true
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        Ok(self.balances.clone())
    }

    async fn switch_chain(&self, _chain_id: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        *self.last.lock() = Some(text.to_string());
        Ok(())
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<DashboardEvent>) -> Vec<&'static str> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind());
    }
    kinds
}

#[tokio::test]
async fn test_payment_screen_quote_and_qr() {
    let calculator = PaymentQuoteCalculator::new(QrRenderService::new(QrServiceConfig::default()));
    let quote = PaymentQuote::new(ADDRESS, dec!(100), dec!(65000), "BTC").unwrap();

    let request = calculator.request(quote).unwrap();
    assert_eq!(request.crypto_amount, "0.00153846");
    assert_eq!(
        request.qr_image_url,
        format!("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data={ADDRESS}")
    );
}

#[tokio::test]
async fn test_payment_quote_rejects_zero_rate() {
    let result = PaymentQuote::new(ADDRESS, dec!(100), dec!(0), "BTC");
    assert!(matches!(result, Err(CoindeckError::InvalidRate { .. })));
}

#[tokio::test]
async fn test_scan_screen_closed_before_permission_resolves() {
    let (grant, gate) = oneshot::channel();
    let released = Arc::new(AtomicUsize::new(0));
    let camera = Arc::new(SlowCamera {
        gate: Mutex::new(Some(gate)),
        released: Arc::clone(&released),
    });
    let sink = BroadcastSink::default();
    let mut events = sink.subscribe();
    let session = Arc::new(CameraSession::new(camera, Arc::new(sink), |_| {}));

    let start = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.start().await }
    });
    while session.state() != ScanState::Requesting {
        tokio::task::yield_now().await;
    }

    // User leaves the scan screen
    session.stop();
    grant.send(()).unwrap();

    assert_eq!(start.await.unwrap(), Err(ScanError::Cancelled));
    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert_eq!(session.state(), ScanState::Stopped);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_scan_decode_feeds_clipboard() {
    let released = Arc::new(AtomicUsize::new(0));
    let camera = Arc::new(SlowCamera {
        gate: Mutex::new(None),
        released: Arc::clone(&released),
    });
    let sink = Arc::new(BroadcastSink::default());
    let mut events = sink.subscribe();

    let scanned = Arc::new(Mutex::new(None::<String>));
    let session = CameraSession::new(camera, sink.clone(), {
        let scanned = Arc::clone(&scanned);
        move |payload: &str| *scanned.lock() = Some(payload.to_string())
    });

    session.start().await.unwrap();
    assert!(session.deliver_decoded(ADDRESS));
    assert_eq!(released.load(Ordering::SeqCst), 1);

    let clipboard = Arc::new(MemoryClipboard::default());
    let mut feedback = ClipboardFeedback::new(clipboard.clone(), sink.clone());
    let payload = scanned.lock().clone().unwrap();
    feedback.copy(&payload).unwrap();

    assert_eq!(clipboard.last.lock().as_deref(), Some(ADDRESS));
    assert!(feedback.is_copied());
    assert_eq!(drain(&mut events), vec!["AddressScanned", "AddressCopied"]);
}

#[tokio::test(start_paused = true)]
async fn test_copy_feedback_window_on_payment_screen() {
    let mut feedback = ClipboardFeedback::with_window(
        Arc::new(MemoryClipboard::default()),
        Arc::new(BroadcastSink::default()),
        Duration::from_millis(2000),
    );
    let mut rx = feedback.subscribe();

    feedback.copy(ADDRESS).unwrap();
    assert!(rx.borrow_and_update().is_copied());

    rx.changed().await.unwrap();
    assert!(!rx.borrow().is_copied());
    assert_eq!(feedback.pending_resets(), 0);
}

#[tokio::test]
async fn test_balances_screen_load() {
    let wallet = Arc::new(StaticWallet {
        balances: vec![
            Balance::new("BTC", dec!(0.5), dec!(32500), "$"),
            Balance::new("ETH", dec!(2), dec!(3700.50), "$"),
        ],
    });
    let sink = BroadcastSink::default();
    let mut events = sink.subscribe();
    let loader = BalanceLoader::new(wallet, Arc::new(sink));

    loader.refresh().await;

    let status = loader.status();
    let balances = status.balances().unwrap();
    assert_eq!(Balance::total_fiat(balances), Some(dec!(36200.50)));
    assert_eq!(drain(&mut events), vec!["BalancesLoaded"]);

    loader.load(false).await;
    assert_eq!(loader.status(), BalanceStatus::NotConnected);
}
