//! Pickers built on the listing mode.
//!
//! Each picker is just a [`StartConfig`](crate::listing::StartConfig).
//! [`start_listing`] creates a [`ListingMode`] from it, adds Enter to accept
//! the selection on top of the built-in keys and makes it the active mode.

use std::sync::{Arc, Weak};

use shline_primitives::Key;

use crate::listing::{ListingMode, StartConfig};
use crate::mode::{HandlerAction, Mode};
use crate::state::State;

pub mod lastcmd;
pub mod location;

/// Starts a listing from `config` and installs it as the active mode. A key
/// handler already in `config` is kept.
pub fn start_listing(state: &State, mut config: StartConfig) -> Arc<ListingMode> {
	let mode = Arc::new_cyclic(|this: &Weak<ListingMode>| {
		if config.key_handler.is_none() {
			let this = this.clone();
			config.key_handler = Some(Arc::new(move |key: Key, state: &State| {
				let Some(mode) = this.upgrade() else {
					return HandlerAction::NoAction;
				};
				if key.is_enter() {
					mode.accept_item_and_close(state);
					HandlerAction::NoAction
				} else {
					mode.default_binding(key, state)
				}
			}));
		}
		ListingMode::started(config)
	});
	state.set_mode(Some(Arc::clone(&mode) as Arc<dyn Mode>));
	mode
}
