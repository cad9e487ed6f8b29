//! The terminal capability consumed by the read loop.

use std::fmt;

use shline_primitives::{Key, MouseEvent};
use shline_tui::Buffer;
use tokio::sync::mpsc;

/// An input event delivered by the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtyEvent {
	Key(Key),
	Mouse(MouseEvent),
	/// Bracketed paste.
	Paste(String),
	/// The reader hit an error it recovered from.
	NonfatalError(String),
}

impl From<Key> for TtyEvent {
	fn from(key: Key) -> Self {
		Self::Key(key)
	}
}

/// Terminal failures.
#[derive(Debug, thiserror::Error)]
pub enum TtyError {
	#[error("terminal setup failed: {0}")]
	Setup(String),
	#[error("terminal I/O: {0}")]
	Io(#[from] std::io::Error),
}

/// Restores the terminal when dropped.
pub struct TtyGuard {
	restore: Option<Box<dyn FnOnce() + Send>>,
}

impl TtyGuard {
	pub fn new(restore: impl FnOnce() + Send + 'static) -> Self {
		Self {
			restore: Some(Box::new(restore)),
		}
	}

	/// A guard with nothing to restore.
	pub fn noop() -> Self {
		Self { restore: None }
	}
}

impl fmt::Debug for TtyGuard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TtyGuard").field("armed", &self.restore.is_some()).finish()
	}
}

impl Drop for TtyGuard {
	fn drop(&mut self) {
		if let Some(restore) = self.restore.take() {
			restore();
		}
	}
}

/// Everything the editor needs from a terminal.
pub trait Tty: Send + Sync {
	/// Configures the terminal for editing. Errors are fatal for the session;
	/// recoverable problems should be handled here (e.g. logged).
	fn setup(&self) -> Result<TtyGuard, TtyError>;

	/// Starts event delivery.
	fn start_input(&self) -> mpsc::Receiver<TtyEvent>;

	/// Raw input reports escape sequences as individual keys. A no-op where
	/// the concept does not apply.
	fn set_raw_input(&self, raw: bool);

	/// Stops event delivery. The receiver returned by
	/// [`Tty::start_input`] delivers nothing after this returns.
	fn stop_input(&self);

	/// Terminal size as `(rows, cols)`.
	fn size(&self) -> (usize, usize);

	/// Moves the cursor below the current frame.
	fn newline(&self);

	/// The frame last drawn, if any.
	fn buffer(&self) -> Option<Buffer>;

	/// Forgets the current frame without drawing.
	fn reset_buffer(&self);

	/// Draws `notes` above the editor area and replaces the frame with
	/// `main`. `full` forces a redraw of every line.
	fn update_buffer(&self, notes: Option<&Buffer>, main: &Buffer, full: bool) -> Result<(), TtyError>;
}
