//! Syntax highlighting capability.
//!
//! The read loop calls [`Highlighter::get`] on every redraw, so it must
//! return immediately. Slow highlighters compute in the background and pulse
//! their late-update channel when a result is ready; the loop then redraws
//! and asks again.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use shline_primitives::StyledText;
use tokio::sync::broadcast;

use crate::worker::{TaskClass, spawn_blocking_or_inline};

/// Highlighted code plus errors to show under it.
pub type Highlighted = (StyledText, Vec<String>);

pub trait Highlighter: Send + Sync {
	fn get(&self, code: &str) -> Highlighted;

	/// Pulses whenever a previously requested result becomes available.
	fn late_updates(&self) -> Option<broadcast::Receiver<()>> {
		None
	}
}

/// Shows the code unstyled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
	fn get(&self, code: &str) -> Highlighted {
		(StyledText::plain(code), Vec::new())
	}
}

type HighlightFn = dyn Fn(&str) -> Highlighted + Send + Sync;

#[derive(Default)]
struct Cache {
	/// Code the cached result belongs to.
	code: Option<String>,
	result: Highlighted,
	/// Code being highlighted in the background.
	pending: Option<String>,
}

/// Runs a highlight function on the blocking pool and caches the result for
/// the last code.
///
/// Until the result for the current code is ready, `get` returns the code
/// unstyled and without errors.
#[derive(Clone)]
pub struct AsyncHighlighter {
	highlight: Arc<HighlightFn>,
	cache: Arc<Mutex<Cache>>,
	updates: broadcast::Sender<()>,
}

impl fmt::Debug for AsyncHighlighter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let cache = self.cache.lock();
		f.debug_struct("AsyncHighlighter")
			.field("cached", &cache.code)
			.field("pending", &cache.pending)
			.finish()
	}
}

impl AsyncHighlighter {
	pub fn new(highlight: impl Fn(&str) -> Highlighted + Send + Sync + 'static) -> Self {
		let (updates, _) = broadcast::channel(16);
		Self {
			highlight: Arc::new(highlight),
			cache: Arc::default(),
			updates,
		}
	}

	/// Drops the cached result, e.g. after the set of known commands changed.
	pub fn invalidate(&self) {
		let mut cache = self.cache.lock();
		cache.code = None;
		cache.result = Highlighted::default();
	}

	fn cached(&self, code: &str) -> Option<Highlighted> {
		let cache = self.cache.lock();
		(cache.code.as_deref() == Some(code)).then(|| cache.result.clone())
	}
}

impl Highlighter for AsyncHighlighter {
	fn get(&self, code: &str) -> Highlighted {
		if let Some(result) = self.cached(code) {
			return result;
		}

		let start = {
			let mut cache = self.cache.lock();
			let start = cache.pending.as_deref() != Some(code);
			if start {
				cache.pending = Some(code.to_string());
			}
			start
		};
		if start {
			let highlight = Arc::clone(&self.highlight);
			let cache = Arc::clone(&self.cache);
			let updates = self.updates.clone();
			let code = code.to_string();
			spawn_blocking_or_inline(TaskClass::Highlight, move || {
				let result = highlight(&code);
				{
					let mut cache = cache.lock();
					if cache.pending.as_deref() == Some(code.as_str()) {
						cache.pending = None;
					}
					cache.code = Some(code);
					cache.result = result;
				}
				// Nobody listening is fine.
				let _ = updates.send(());
			});
		}

		// Inline computation outside a runtime has already filled the cache.
		self.cached(code)
			.unwrap_or_else(|| (StyledText::plain(code), Vec::new()))
	}

	fn late_updates(&self) -> Option<broadcast::Receiver<()>> {
		Some(self.updates.subscribe())
	}
}
