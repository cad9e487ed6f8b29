//! Key binding dispatch.
//!
//! A [`Dispatcher`] resolves a key against layered [`BindingTable`]s (exact
//! keys in every layer first, then the layers' defaults) and calls the
//! resolved [`Binding`]. Whatever goes wrong inside a binding ends up as a
//! notice; the only thing a binding can hand back to the read loop is a
//! requested [`HandlerAction`], signalled through [`BindingError::Action`].

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use shline_keymap::{BindingMap, lookup_layered};
use shline_primitives::Key;

use crate::mode::HandlerAction;
use crate::state::State;

pub mod builtins;
mod port;
mod value;
#[cfg(test)]
mod tests;

pub use port::NoticePort;
pub use value::Value;

/// Failure of a binding call.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
	/// Not a failure: the binding asks the read loop to perform an action.
	#[error("action {0:?} requested")]
	Action(HandlerAction),
	#[error("arity mismatch: want {want} arguments, got {got}")]
	Arity { want: usize, got: usize },
	#[error("{0}")]
	Failed(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl BindingError {
	pub fn failed(msg: impl fmt::Display) -> Self {
		Self::Failed(msg.to_string())
	}
}

/// What a binding sees while it runs.
pub struct BindingContext<'a> {
	state: &'a State,
	key: Key,
	port: NoticePort<'a>,
}

impl<'a> BindingContext<'a> {
	pub fn new(state: &'a State, key: Key) -> Self {
		Self {
			state,
			key,
			port: NoticePort::new(state),
		}
	}

	pub fn state(&self) -> &'a State {
		self.state
	}

	/// The key that triggered this call.
	pub fn key(&self) -> Key {
		self.key
	}

	/// Outputs a value.
	pub fn put(&mut self, value: impl Into<Value>) {
		self.port.put(value.into());
	}

	/// Byte output; complete lines become notices.
	pub fn out(&mut self) -> &mut NoticePort<'a> {
		&mut self.port
	}

	fn close(&mut self) {
		self.port.close();
	}
}

/// A callable bound to a key.
pub trait Binding: Send + Sync {
	fn call(&self, args: &[Value], ctx: &mut BindingContext<'_>) -> Result<(), BindingError>;
}

type BindingFn = dyn Fn(&[Value], &mut BindingContext<'_>) -> Result<(), BindingError> + Send + Sync;

/// A binding backed by a closure that takes a fixed number of arguments.
pub struct FnBinding {
	arity: usize,
	f: Box<BindingFn>,
}

impl FnBinding {
	pub fn with_arity<F>(arity: usize, f: F) -> Self
	where
		F: Fn(&[Value], &mut BindingContext<'_>) -> Result<(), BindingError> + Send + Sync + 'static,
	{
		Self { arity, f: Box::new(f) }
	}
}

impl Binding for FnBinding {
	fn call(&self, args: &[Value], ctx: &mut BindingContext<'_>) -> Result<(), BindingError> {
		if args.len() != self.arity {
			return Err(BindingError::Arity {
				want: self.arity,
				got: args.len(),
			});
		}
		(self.f)(args, ctx)
	}
}

/// Wraps a zero-argument closure as a shareable binding.
pub fn binding<F>(f: F) -> Arc<dyn Binding>
where
	F: Fn(&mut BindingContext<'_>) -> Result<(), BindingError> + Send + Sync + 'static,
{
	Arc::new(FnBinding::with_arity(0, move |_, ctx| f(ctx)))
}

pub type BindingTable = BindingMap<Arc<dyn Binding>>;
/// A binding table that stays editable while a dispatcher uses it.
pub type SharedBindings = Arc<RwLock<BindingTable>>;

/// Resolves keys against layered binding tables, most specific first.
#[derive(Clone, Default)]
pub struct Dispatcher {
	layers: Vec<SharedBindings>,
}

impl Dispatcher {
	pub fn new(layers: Vec<SharedBindings>) -> Self {
		Self { layers }
	}

	pub fn push_layer(&mut self, layer: SharedBindings) {
		self.layers.push(layer);
	}

	/// Finds and calls the binding for `key`. Unbound keys produce an
	/// `Unbound: <key>` notice.
	pub fn dispatch(&self, key: Key, state: &State) -> HandlerAction {
		// Tables are unlocked before the call so a binding may rebind keys.
		let found = {
			let guards: Vec<_> = self.layers.iter().map(|layer| layer.read()).collect();
			let tables: Vec<&BindingTable> = guards.iter().map(|guard| &**guard).collect();
			lookup_layered(&key, &tables).map(|found| (Arc::clone(found.handler), found.layer, found.matched))
		};

		let Some((binding, layer, matched)) = found else {
			tracing::debug!(%key, "binding.unbound");
			state.add_notice(format!("Unbound: {key}"));
			return HandlerAction::NoAction;
		};

		tracing::trace!(%key, layer, ?matched, "binding.dispatch");
		state.set_binding_key(key);
		call_binding(binding.as_ref(), key, state)
	}
}

impl fmt::Debug for Dispatcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Dispatcher").field("layers", &self.layers.len()).finish()
	}
}

/// Calls `binding` with no arguments and turns its outcome into an action.
pub fn call_binding(binding: &dyn Binding, key: Key, state: &State) -> HandlerAction {
	let mut ctx = BindingContext::new(state, key);
	let result = binding.call(&[], &mut ctx);
	ctx.close();
	match result {
		Ok(()) => HandlerAction::NoAction,
		Err(BindingError::Action(action)) => action,
		Err(err) => {
			tracing::debug!(%key, %err, "binding.error");
			state.add_notice(format!("[binding error] {err}"));
			HandlerAction::NoAction
		}
	}
}
