//! The shared editor state.
//!
//! [`State`] wraps a [`RawState`] in a mutex. Every accessor holds the lock
//! only for the read or mutation it performs; nothing blocks on I/O while
//! holding it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use shline_primitives::Key;

use crate::mode::{Mode, PlaceholderMode};

#[cfg(test)]
mod tests;

/// A staged replacement of `code[begin..end]` by `text`, shown in place of
/// that range until it is applied or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCode {
	pub begin: usize,
	pub end: usize,
	pub text: String,
}

/// The unsynchronized state record. Obtained as a snapshot through
/// [`State::pop_for_redraw`] and [`State::finalize`], or mutated in place
/// through [`State::mutate`].
#[derive(Clone, Default)]
pub struct RawState {
	/// Active mode; `None` means the application's default mode.
	pub mode: Option<Arc<dyn Mode>>,
	pub code: String,
	/// Byte offset into `code`.
	pub dot: usize,
	pub pending: Option<PendingCode>,
	/// Notices accumulated since the last redraw.
	pub notes: Vec<String>,
	/// Key being handled by the current binding.
	pub binding_key: Option<Key>,
}

impl fmt::Debug for RawState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RawState")
			.field("mode", &self.mode.as_ref().map(|_| ".."))
			.field("code", &self.code)
			.field("dot", &self.dot)
			.field("pending", &self.pending)
			.field("notes", &self.notes)
			.field("binding_key", &self.binding_key)
			.finish()
	}
}

impl RawState {
	/// Code and dot as they should be displayed: a pending replacement is
	/// applied and the dot placed at the end of its text.
	pub fn display_code(&self) -> (String, usize) {
		let Some(pending) = &self.pending else {
			return (self.code.clone(), self.dot);
		};
		let end = floor_char_boundary(&self.code, pending.end);
		let begin = floor_char_boundary(&self.code, pending.begin.min(end));
		let mut code = String::with_capacity(self.code.len() + pending.text.len());
		code.push_str(&self.code[..begin]);
		code.push_str(&pending.text);
		code.push_str(&self.code[end..]);
		(code, begin + pending.text.len())
	}
}

/// Largest char boundary of `s` that is `<= i`.
pub(crate) fn floor_char_boundary(s: &str, i: usize) -> usize {
	let mut i = i.min(s.len());
	while !s.is_char_boundary(i) {
		i -= 1;
	}
	i
}

/// Mutex-guarded editor state shared by the read loop, modes, bindings and
/// background producers.
#[derive(Default)]
pub struct State {
	raw: Mutex<RawState>,
}

impl State {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `f` on the raw record under the lock.
	pub fn mutate<R>(&self, f: impl FnOnce(&mut RawState) -> R) -> R {
		f(&mut self.raw.lock())
	}

	/// A copy of the raw record.
	pub fn snapshot(&self) -> RawState {
		self.raw.lock().clone()
	}

	pub fn mode(&self) -> Option<Arc<dyn Mode>> {
		self.raw.lock().mode.clone()
	}

	pub fn set_mode(&self, mode: Option<Arc<dyn Mode>>) {
		tracing::debug!(custom = mode.is_some(), "state.set_mode");
		self.raw.lock().mode = mode;
	}

	pub fn code(&self) -> String {
		self.raw.lock().code.clone()
	}

	pub fn code_and_dot(&self) -> (String, usize) {
		let raw = self.raw.lock();
		(raw.code.clone(), raw.dot)
	}

	pub fn code_before_dot(&self) -> String {
		let raw = self.raw.lock();
		raw.code[..floor_char_boundary(&raw.code, raw.dot)].to_string()
	}

	pub fn code_after_dot(&self) -> String {
		let raw = self.raw.lock();
		raw.code[floor_char_boundary(&raw.code, raw.dot)..].to_string()
	}

	/// Replaces the code. The dot is clamped into the code and onto a char
	/// boundary.
	pub fn set_code_and_dot(&self, code: impl Into<String>, dot: usize) {
		let code = code.into();
		let mut raw = self.raw.lock();
		raw.dot = floor_char_boundary(&code, dot);
		raw.code = code;
	}

	/// Splices `text` into the code at the dot and advances the dot past it.
	pub fn insert_at_dot(&self, text: &str) {
		let mut raw = self.raw.lock();
		let dot = floor_char_boundary(&raw.code, raw.dot);
		raw.code.insert_str(dot, text);
		raw.dot = dot + text.len();
	}

	pub fn pending(&self) -> Option<PendingCode> {
		self.raw.lock().pending.clone()
	}

	pub fn set_pending(&self, pending: Option<PendingCode>) {
		self.raw.lock().pending = pending;
	}

	pub fn add_notice(&self, note: impl Into<String>) {
		self.raw.lock().notes.push(note.into());
	}

	/// Notices not yet consumed by a redraw.
	pub fn notes(&self) -> Vec<String> {
		self.raw.lock().notes.clone()
	}

	pub fn binding_key(&self) -> Option<Key> {
		self.raw.lock().binding_key
	}

	pub fn set_binding_key(&self, key: Key) {
		self.raw.lock().binding_key = Some(key);
	}

	/// Empties the state: no mode, no code, no notices.
	pub fn reset(&self) {
		*self.raw.lock() = RawState::default();
	}

	/// Snapshots the state for a redraw and clears the notices in the same
	/// critical section, so each notice is drawn exactly once.
	pub fn pop_for_redraw(&self) -> RawState {
		let mut raw = self.raw.lock();
		let snapshot = raw.clone();
		raw.notes.clear();
		snapshot
	}

	/// Snapshot for the last frame of a session: the dot at the end of the
	/// code, no pending replacement and a mode that renders nothing.
	pub fn finalize(&self) -> RawState {
		let raw = self.raw.lock();
		RawState {
			mode: Some(Arc::new(PlaceholderMode)),
			code: raw.code.clone(),
			dot: raw.code.len(),
			pending: None,
			notes: raw.notes.clone(),
			binding_key: None,
		}
	}
}
