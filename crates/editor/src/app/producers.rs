//! Background producers of one read-code session.
//!
//! Every producer runs as a task in a [`Producers`] set and delivers into a
//! channel owned by the read loop. Shutdown cancels the shared token and joins
//! every task, so nothing is left writing into the loop's channels. Dropping
//! the set without a shutdown cancels the token and lets the tasks wind down
//! on their own.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::worker::TaskClass;

/// Counts a running producer until dropped.
struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
	fn enter(active: &Arc<AtomicUsize>) -> Self {
		active.fetch_add(1, Ordering::SeqCst);
		Self(Arc::clone(active))
	}
}

impl Drop for ActiveGuard {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

pub(crate) struct Producers {
	stop: CancellationToken,
	tasks: JoinSet<()>,
	active: Arc<AtomicUsize>,
}

impl Producers {
	pub(crate) fn new(active: Arc<AtomicUsize>) -> Self {
		Self {
			stop: CancellationToken::new(),
			tasks: JoinSet::new(),
			active,
		}
	}

	/// Spawns a producer. `make` receives the token that signals shutdown.
	pub(crate) fn spawn<F>(&mut self, class: TaskClass, make: impl FnOnce(CancellationToken) -> F)
	where
		F: Future<Output = ()> + Send + 'static,
	{
		tracing::trace!(worker_class = class.as_str(), pending = self.tasks.len(), "producer.spawn");
		let guard = ActiveGuard::enter(&self.active);
		let fut = make(self.stop.clone());
		self.tasks.spawn(async move {
			let _guard = guard;
			fut.await;
			tracing::trace!(worker_class = class.as_str(), "producer.stop");
		});
	}

	/// Forwards late-update pulses from `updates` to `tx`. Pulses coalesce
	/// while the loop has one pending.
	pub(crate) fn relay(&mut self, mut updates: broadcast::Receiver<()>, tx: mpsc::Sender<()>) {
		self.spawn(TaskClass::LateUpdates, |stop| async move {
			loop {
				tokio::select! {
					() = stop.cancelled() => break,
					pulse = updates.recv() => match pulse {
						Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
							let _ = tx.try_send(());
						}
						Err(broadcast::error::RecvError::Closed) => break,
					},
				}
			}
		});
	}

	/// Cancels every producer and waits for all of them to finish.
	pub(crate) async fn shutdown(&mut self) {
		self.stop.cancel();
		while let Some(joined) = self.tasks.join_next().await {
			if let Err(err) = joined {
				tracing::warn!(%err, "producer.join_failed");
			}
		}
		tracing::trace!(active = self.active.load(Ordering::SeqCst), "producer.shutdown");
	}
}

impl Drop for Producers {
	fn drop(&mut self) {
		if self.tasks.is_empty() {
			return;
		}
		tracing::debug!(pending = self.tasks.len(), "producer.detach");
		self.stop.cancel();
		self.tasks.detach_all();
	}
}
