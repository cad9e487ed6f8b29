//! The mode abstraction.
//!
//! A [`Mode`] is the editor's current activity. The read loop hands it every
//! terminal event; the layout engine asks it for a mode line, render flags
//! and, when it is a [`Lister`], a panel.

use bitflags::bitflags;
use shline_tui::Renderer;

use crate::state::State;
use crate::tty::TtyEvent;

pub(crate) mod basic;
mod binding_mode;

pub use basic::BasicMode;
pub use binding_mode::BindingMode;

/// What the read loop should do after a mode handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerAction {
	#[default]
	NoAction,
	Redraw,
	/// End the session and return the code.
	CommitCode,
}

bitflags! {
	/// Layout hints reported by a mode.
	#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
	pub struct ModeRenderFlags: u8 {
		/// Place the cursor on the mode line instead of in the code.
		const CURSOR_ON_MODE_LINE = 1;
		/// Render the mode line again after the panel; the mode line depends
		/// on what the panel showed.
		const REDRAW_MODE_LINE_AFTER_LIST = 1 << 1;
	}
}

/// A mode that shows a panel below the mode line.
pub trait Lister {
	/// Renderer for the panel, using at most `max_height` lines.
	fn list(&self, max_height: usize) -> Box<dyn Renderer>;
}

/// The editor's current activity.
pub trait Mode: Send + Sync {
	/// The status line for this mode, or `None` for no mode line.
	fn mode_line(&self) -> Option<Box<dyn Renderer>>;

	fn render_flags(&self) -> ModeRenderFlags {
		ModeRenderFlags::empty()
	}

	fn handle_event(&self, event: &TtyEvent, state: &State) -> HandlerAction;

	/// The panel capability, if this mode has one.
	fn lister(&self) -> Option<&dyn Lister> {
		None
	}
}

/// Mode of the finalized state: renders nothing, ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderMode;

impl Mode for PlaceholderMode {
	fn mode_line(&self) -> Option<Box<dyn Renderer>> {
		None
	}

	fn handle_event(&self, _event: &TtyEvent, _state: &State) -> HandlerAction {
		HandlerAction::NoAction
	}
}
