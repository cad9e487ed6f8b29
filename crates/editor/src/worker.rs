//! Task spawning shared by the background producers.

use tokio::runtime::Handle;

/// What a background task is for; recorded on every spawn trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskClass {
	Highlight,
	Prompt,
	LateUpdates,
	Signals,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Highlight => "highlight",
			Self::Prompt => "prompt",
			Self::LateUpdates => "late_updates",
			Self::Signals => "signals",
		}
	}
}

/// Runs `f` on the blocking pool of the current runtime, or inline when
/// called outside a runtime.
pub(crate) fn spawn_blocking_or_inline<F>(class: TaskClass, f: F)
where
	F: FnOnce() + Send + 'static,
{
	match Handle::try_current() {
		Ok(handle) => {
			tracing::trace!(worker_class = class.as_str(), "worker.spawn_blocking");
			drop(handle.spawn_blocking(f));
		}
		Err(_) => {
			tracing::trace!(worker_class = class.as_str(), "worker.inline");
			f();
		}
	}
}
