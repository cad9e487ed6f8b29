//! OS signals relevant to a read-code session.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A signal delivered to the read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
	/// Terminal size changed; redraw in full.
	Resize,
	/// Discard the current input and keep reading.
	Interrupt,
	/// The terminal went away; end the session as end-of-input.
	Hangup,
	/// Any other signal number; ignored by the loop.
	Other(i32),
}

/// Source of [`Signal`]s for one session.
#[async_trait]
pub trait SignalSource: Send + Sync {
	/// Delivers signals on `tx` until `stop` is cancelled.
	async fn run(&self, tx: mpsc::Sender<Signal>, stop: CancellationToken);
}

/// A source that never delivers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSignals;

#[async_trait]
impl SignalSource for NoSignals {
	async fn run(&self, _tx: mpsc::Sender<Signal>, stop: CancellationToken) {
		stop.cancelled().await;
	}
}
