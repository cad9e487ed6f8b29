//! Fakes for driving a session from tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shline_primitives::Key;
use shline_tui::Buffer;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::signal::{Signal, SignalSource};
use crate::tty::{Tty, TtyError, TtyEvent, TtyGuard};

const EVENT_BUFFER: usize = 64;
const VERIFY_TIMEOUT: Duration = Duration::from_secs(1);

/// A terminal that records frames instead of drawing them.
pub(crate) struct FakeTty {
	events_tx: mpsc::Sender<TtyEvent>,
	events_rx: Mutex<Option<mpsc::Receiver<TtyEvent>>>,
	setup_error: Mutex<Option<String>>,
	restores: Arc<AtomicUsize>,
	input_stops: AtomicUsize,
	size: Mutex<(usize, usize)>,
	current: Mutex<Option<Buffer>>,
	/// Every committed main frame; `None` marks a buffer reset.
	pub(crate) frames: Mutex<Vec<Option<Buffer>>>,
	pub(crate) notes: Mutex<Vec<Buffer>>,
	pub(crate) raw_input: Mutex<Option<bool>>,
}

impl FakeTty {
	pub(crate) fn new() -> Arc<Self> {
		let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
		Arc::new(Self {
			events_tx,
			events_rx: Mutex::new(Some(events_rx)),
			setup_error: Mutex::new(None),
			restores: Arc::new(AtomicUsize::new(0)),
			input_stops: AtomicUsize::new(0),
			size: Mutex::new((24, 80)),
			current: Mutex::new(None),
			frames: Mutex::new(Vec::new()),
			notes: Mutex::new(Vec::new()),
			raw_input: Mutex::new(None),
		})
	}

	/// Queues an event; it is delivered once a session starts input.
	pub(crate) fn send(&self, event: impl Into<TtyEvent>) {
		if self.events_tx.try_send(event.into()).is_err() {
			panic!("fake tty event buffer is full");
		}
	}

	pub(crate) fn send_keys(&self, keys: &str) {
		for c in keys.chars() {
			self.send(Key::char(c));
		}
	}

	pub(crate) fn fail_setup(&self, msg: &str) {
		*self.setup_error.lock() = Some(msg.to_string());
	}

	pub(crate) fn set_size(&self, rows: usize, cols: usize) {
		*self.size.lock() = (rows, cols);
	}

	pub(crate) fn restores(&self) -> usize {
		self.restores.load(Ordering::SeqCst)
	}

	pub(crate) fn input_stops(&self) -> usize {
		self.input_stops.load(Ordering::SeqCst)
	}

	pub(crate) fn last_frame(&self) -> Option<Buffer> {
		self.frames.lock().iter().rev().flatten().next().cloned()
	}

	/// Waits until the last main frame equals `want`.
	pub(crate) async fn verify_frame(&self, want: &Buffer) -> bool {
		self.wait_for(|tty| tty.frames.lock().last().cloned().flatten().as_ref() == Some(want)).await
	}

	/// Waits until the last main frame satisfies `pred`.
	pub(crate) async fn wait_frame(&self, pred: impl Fn(&Buffer) -> bool) -> bool {
		self.wait_for(|tty| tty.frames.lock().last().cloned().flatten().is_some_and(|b| pred(&b))).await
	}

	/// Waits until the last notes frame equals `want`.
	pub(crate) async fn verify_notes(&self, want: &Buffer) -> bool {
		self.wait_for(|tty| tty.notes.lock().last() == Some(want)).await
	}

	async fn wait_for(&self, check: impl Fn(&Self) -> bool) -> bool {
		let deadline = tokio::time::Instant::now() + VERIFY_TIMEOUT;
		while tokio::time::Instant::now() < deadline {
			if check(self) {
				return true;
			}
			tokio::time::sleep(Duration::from_millis(5)).await;
		}
		check(self)
	}
}

impl Tty for FakeTty {
	fn setup(&self) -> Result<TtyGuard, TtyError> {
		if let Some(msg) = self.setup_error.lock().clone() {
			return Err(TtyError::Setup(msg));
		}
		let restores = Arc::clone(&self.restores);
		Ok(TtyGuard::new(move || {
			restores.fetch_add(1, Ordering::SeqCst);
		}))
	}

	fn start_input(&self) -> mpsc::Receiver<TtyEvent> {
		self.events_rx.lock().take().unwrap_or_else(|| mpsc::channel(1).1)
	}

	fn set_raw_input(&self, raw: bool) {
		*self.raw_input.lock() = Some(raw);
	}

	fn stop_input(&self) {
		self.input_stops.fetch_add(1, Ordering::SeqCst);
	}

	fn size(&self) -> (usize, usize) {
		*self.size.lock()
	}

	fn newline(&self) {}

	fn buffer(&self) -> Option<Buffer> {
		self.current.lock().clone()
	}

	fn reset_buffer(&self) {
		*self.current.lock() = None;
		self.frames.lock().push(None);
	}

	fn update_buffer(&self, notes: Option<&Buffer>, main: &Buffer, _full: bool) -> Result<(), TtyError> {
		if let Some(notes) = notes {
			self.notes.lock().push(notes.clone());
		}
		*self.current.lock() = Some(main.clone());
		self.frames.lock().push(Some(main.clone()));
		Ok(())
	}
}

/// A signal source fed by the test.
pub(crate) struct FakeSignalSource {
	tx: mpsc::Sender<Signal>,
	rx: Mutex<Option<mpsc::Receiver<Signal>>>,
}

impl FakeSignalSource {
	pub(crate) fn new() -> Arc<Self> {
		let (tx, rx) = mpsc::channel(EVENT_BUFFER);
		Arc::new(Self {
			tx,
			rx: Mutex::new(Some(rx)),
		})
	}

	pub(crate) async fn send(&self, signal: Signal) {
		if self.tx.send(signal).await.is_err() {
			panic!("fake signal source closed");
		}
	}
}

#[async_trait]
impl SignalSource for FakeSignalSource {
	async fn run(&self, tx: mpsc::Sender<Signal>, stop: CancellationToken) {
		let rx = self.rx.lock().take();
		let Some(mut rx) = rx else {
			stop.cancelled().await;
			return;
		};
		loop {
			tokio::select! {
				() = stop.cancelled() => break,
				Some(signal) = rx.recv() => {
					if tx.send(signal).await.is_err() {
						break;
					}
				}
			}
		}
		*self.rx.lock() = Some(rx);
	}
}
