use shline_primitives::{Key, KeyCode};
use shline_tui::Renderer;

use super::{HandlerAction, Mode};
use crate::state::{State, floor_char_boundary};
use crate::tty::TtyEvent;

/// Default mode: inserts printable keys and pastes, Enter commits.
///
/// Backspace, Left and Right cover the bare minimum of editing; anything
/// richer belongs in a [`BindingMode`](super::BindingMode).
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicMode;

impl Mode for BasicMode {
	fn mode_line(&self) -> Option<Box<dyn Renderer>> {
		None
	}

	fn handle_event(&self, event: &TtyEvent, state: &State) -> HandlerAction {
		match event {
			TtyEvent::Key(key) => handle_key(*key, state),
			TtyEvent::Paste(text) => {
				state.insert_at_dot(text);
				HandlerAction::NoAction
			}
			TtyEvent::Mouse(_) | TtyEvent::NonfatalError(_) => HandlerAction::NoAction,
		}
	}
}

fn handle_key(key: Key, state: &State) -> HandlerAction {
	if key.is_enter() {
		return HandlerAction::CommitCode;
	}
	if key.is_printable()
		&& let Some(c) = key.codepoint()
	{
		state.insert_at_dot(c.encode_utf8(&mut [0; 4]));
		return HandlerAction::NoAction;
	}
	if key.modifiers.is_empty() {
		match key.code {
			KeyCode::Backspace => delete_before_dot(state),
			KeyCode::Left => move_dot(state, false),
			KeyCode::Right => move_dot(state, true),
			_ => {}
		}
	}
	HandlerAction::NoAction
}

/// Removes the char before the dot.
pub(crate) fn delete_before_dot(state: &State) {
	state.mutate(|raw| {
		let dot = floor_char_boundary(&raw.code, raw.dot);
		if let Some(c) = raw.code[..dot].chars().next_back() {
			let start = dot - c.len_utf8();
			raw.code.replace_range(start..dot, "");
			raw.dot = start;
		}
	});
}

/// Moves the dot one char left or right.
pub(crate) fn move_dot(state: &State, forward: bool) {
	state.mutate(|raw| {
		let dot = floor_char_boundary(&raw.code, raw.dot);
		raw.dot = if forward {
			raw.code[dot..].chars().next().map_or(dot, |c| dot + c.len_utf8())
		} else {
			raw.code[..dot].chars().next_back().map_or(dot, |c| dot - c.len_utf8())
		};
	});
}
