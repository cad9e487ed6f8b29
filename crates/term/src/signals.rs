//! OS signals for the read loop.

use async_trait::async_trait;
use shline_editor::{Signal, SignalSource};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Delivers `SIGWINCH`, `SIGINT` and `SIGHUP` while a session runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixSignals;

#[async_trait]
impl SignalSource for UnixSignals {
	async fn run(&self, tx: mpsc::Sender<Signal>, stop: CancellationToken) {
		let streams = (
			signal(SignalKind::window_change()),
			signal(SignalKind::interrupt()),
			signal(SignalKind::hangup()),
		);
		let (Ok(mut winch), Ok(mut int), Ok(mut hup)) = streams else {
			tracing::warn!("signals.install_failed");
			stop.cancelled().await;
			return;
		};

		loop {
			let received = tokio::select! {
				() = stop.cancelled() => break,
				Some(()) = winch.recv() => Signal::Resize,
				Some(()) = int.recv() => Signal::Interrupt,
				Some(()) = hup.recv() => Signal::Hangup,
			};
			tracing::trace!(signal = ?received, "signals.received");
			if tx.send(received).await.is_err() {
				break;
			}
		}
	}
}
