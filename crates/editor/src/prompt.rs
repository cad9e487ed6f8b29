//! Prompt capability.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use shline_primitives::StyledText;
use tokio::sync::broadcast;

use crate::worker::{TaskClass, spawn_blocking_or_inline};

pub trait Prompt: Send + Sync {
	/// Asks for the prompt to be recomputed. A `force`d trigger is never
	/// dropped; others may be coalesced with a computation in flight.
	fn trigger(&self, force: bool);

	/// The latest computed prompt.
	fn get(&self) -> StyledText;

	/// Pulses whenever a new prompt is ready.
	fn late_updates(&self) -> Option<broadcast::Receiver<()>> {
		None
	}
}

/// A prompt that never changes.
#[derive(Debug, Clone, Default)]
pub struct ConstPrompt(pub StyledText);

impl ConstPrompt {
	pub fn new(text: impl Into<StyledText>) -> Self {
		Self(text.into())
	}
}

impl Prompt for ConstPrompt {
	fn trigger(&self, _force: bool) {}

	fn get(&self) -> StyledText {
		self.0.clone()
	}
}

#[derive(Debug, Default)]
struct Status {
	computing: bool,
	/// A forced trigger arrived while computing.
	queued: bool,
}

struct Shared {
	compute: Box<dyn Fn() -> StyledText + Send + Sync>,
	current: Mutex<StyledText>,
	status: Mutex<Status>,
	updates: broadcast::Sender<()>,
}

/// A prompt computed in the background on each trigger. The previous prompt
/// is shown until the new one is ready.
#[derive(Clone)]
pub struct ComputedPrompt {
	shared: Arc<Shared>,
}

impl fmt::Debug for ComputedPrompt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComputedPrompt")
			.field("current", &*self.shared.current.lock())
			.field("status", &*self.shared.status.lock())
			.finish()
	}
}

impl ComputedPrompt {
	/// A prompt showing `initial` until `compute` first finishes.
	pub fn new(initial: impl Into<StyledText>, compute: impl Fn() -> StyledText + Send + Sync + 'static) -> Self {
		let (updates, _) = broadcast::channel(16);
		Self {
			shared: Arc::new(Shared {
				compute: Box::new(compute),
				current: Mutex::new(initial.into()),
				status: Mutex::default(),
				updates,
			}),
		}
	}
}

fn run(shared: &Shared) {
	loop {
		let prompt = (shared.compute)();
		*shared.current.lock() = prompt;
		let _ = shared.updates.send(());

		let mut status = shared.status.lock();
		if status.queued {
			status.queued = false;
			continue;
		}
		status.computing = false;
		return;
	}
}

impl Prompt for ComputedPrompt {
	fn trigger(&self, force: bool) {
		{
			let mut status = self.shared.status.lock();
			if status.computing {
				status.queued |= force;
				return;
			}
			status.computing = true;
		}
		let shared = Arc::clone(&self.shared);
		spawn_blocking_or_inline(TaskClass::Prompt, move || run(&shared));
	}

	fn get(&self) -> StyledText {
		self.shared.current.lock().clone()
	}

	fn late_updates(&self) -> Option<broadcast::Receiver<()>> {
		Some(self.shared.updates.subscribe())
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn const_prompt_is_constant() {
		let prompt = ConstPrompt::new("~> ");
		prompt.trigger(true);
		assert_eq!(prompt.get().to_plain(), "~> ");
		assert!(prompt.late_updates().is_none());
	}

	#[test]
	fn computed_prompt_outside_runtime_computes_inline() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let prompt = ComputedPrompt::new("...", move || {
			let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
			StyledText::plain(format!("{n}> "))
		});
		assert_eq!(prompt.get().to_plain(), "...");

		prompt.trigger(false);
		assert_eq!(prompt.get().to_plain(), "1> ");
		prompt.trigger(true);
		assert_eq!(prompt.get().to_plain(), "2> ");
	}

	#[tokio::test]
	async fn computed_prompt_pulses_when_ready() {
		let prompt = ComputedPrompt::new("...", || StyledText::plain("done> "));
		let mut updates = prompt.late_updates().expect("late updates");

		prompt.trigger(true);
		tokio::time::timeout(std::time::Duration::from_secs(1), updates.recv())
			.await
			.expect("pulse")
			.expect("channel open");

		assert_eq!(prompt.get().to_plain(), "done> ");
	}

	#[tokio::test]
	async fn triggers_while_computing_are_coalesced() {
		let gate = Arc::new(std::sync::Barrier::new(2));
		let calls = Arc::new(AtomicUsize::new(0));
		let (g, c) = (Arc::clone(&gate), Arc::clone(&calls));
		let prompt = ComputedPrompt::new("", move || {
			if c.fetch_add(1, Ordering::SeqCst) == 0 {
				g.wait();
			}
			StyledText::plain("p")
		});
		let mut updates = prompt.late_updates().expect("late updates");

		prompt.trigger(true);
		// Both arrive while the first computation is blocked.
		prompt.trigger(false);
		prompt.trigger(true);
		gate.wait();

		for _ in 0..2 {
			tokio::time::timeout(std::time::Duration::from_secs(1), updates.recv())
				.await
				.expect("pulse")
				.expect("channel open");
		}
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}
}
