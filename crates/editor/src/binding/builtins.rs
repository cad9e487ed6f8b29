//! Bindings for the basic editing operations.

use std::sync::Arc;

use super::{Binding, BindingError, binding};
use crate::mode::HandlerAction;
use crate::mode::basic::{delete_before_dot, move_dot};

/// Returns to the default mode.
pub fn reset_mode() -> Arc<dyn Binding> {
	binding(|ctx| {
		ctx.state().set_mode(None);
		Ok(())
	})
}

/// Ends the read session with the current code.
pub fn commit_code() -> Arc<dyn Binding> {
	binding(|_| Err(BindingError::Action(HandlerAction::CommitCode)))
}

/// Inserts the triggering key when it is printable.
pub fn insert_key() -> Arc<dyn Binding> {
	binding(|ctx| {
		let key = ctx.key();
		if key.is_printable()
			&& let Some(c) = key.codepoint()
		{
			ctx.state().insert_at_dot(c.encode_utf8(&mut [0; 4]));
		}
		Ok(())
	})
}

pub fn backspace() -> Arc<dyn Binding> {
	binding(|ctx| {
		delete_before_dot(ctx.state());
		Ok(())
	})
}

pub fn move_dot_left() -> Arc<dyn Binding> {
	binding(|ctx| {
		move_dot(ctx.state(), false);
		Ok(())
	})
}

pub fn move_dot_right() -> Arc<dyn Binding> {
	binding(|ctx| {
		move_dot(ctx.state(), true);
		Ok(())
	})
}

/// Looks up a builtin by the name used in binding files.
pub fn by_name(name: &str) -> Option<Arc<dyn Binding>> {
	Some(match name {
		"reset-mode" => reset_mode(),
		"commit-code" => commit_code(),
		"self-insert" => insert_key(),
		"backspace" => backspace(),
		"move-left" => move_dot_left(),
		"move-right" => move_dot_right(),
		_ => return None,
	})
}
