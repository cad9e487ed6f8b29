use shline_tui::{ModeLineRenderer, Renderer};

use super::{HandlerAction, Mode};
use crate::binding::Dispatcher;
use crate::state::State;
use crate::tty::TtyEvent;

/// A mode whose keys are resolved through a [`Dispatcher`].
///
/// Pastes are inserted at the dot; other non-key events are ignored.
#[derive(Debug, Clone)]
pub struct BindingMode {
	name: Option<String>,
	dispatcher: Dispatcher,
}

impl BindingMode {
	/// A mode without a mode line, such as the insert mode.
	pub fn new(dispatcher: Dispatcher) -> Self {
		Self { name: None, dispatcher }
	}

	/// A mode showing `name` on its mode line.
	pub fn named(name: impl Into<String>, dispatcher: Dispatcher) -> Self {
		Self {
			name: Some(name.into()),
			dispatcher,
		}
	}

	pub fn dispatcher(&self) -> &Dispatcher {
		&self.dispatcher
	}
}

impl Mode for BindingMode {
	fn mode_line(&self) -> Option<Box<dyn Renderer>> {
		self.name
			.as_deref()
			.map(|name| Box::new(ModeLineRenderer::new(name, "")) as Box<dyn Renderer>)
	}

	fn handle_event(&self, event: &TtyEvent, state: &State) -> HandlerAction {
		match event {
			TtyEvent::Key(key) => self.dispatcher.dispatch(*key, state),
			TtyEvent::Paste(text) => {
				state.insert_at_dot(text);
				HandlerAction::NoAction
			}
			TtyEvent::Mouse(_) | TtyEvent::NonfatalError(_) => HandlerAction::NoAction,
		}
	}
}
