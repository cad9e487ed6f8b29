//! The listing mode: a generic filter, select and scroll engine.
//!
//! Pickers are instantiations of one [`ListingMode`] with different
//! [`StartConfig`]s. The config supplies the entries, as a function from the
//! filter text to [`Items`], and chooses between the built-in key handling
//! and a custom key handler.
//!
//! Built-in keys:
//!
//! | key | action |
//! |---|---|
//! | `Esc` / `Ctrl-[` | leave the mode |
//! | `Up` / `Down` | move the selection, stopping at the ends |
//! | `Tab` / `Shift-Tab` | move the selection, wrapping around |
//! | `Ctrl-F` | toggle filtering |
//! | anything else | [`ListingMode::default_handler`] |

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use shline_primitives::{Key, KeyCode, Modifier, StyledText};
use shline_tui::{ModeLineRenderer, Renderer, StringRenderer, StyledLinesRenderer, VerticalScrollbar};

use crate::mode::{HandlerAction, Lister, Mode, ModeRenderFlags};
use crate::state::State;
use crate::tty::TtyEvent;

mod items;
mod state;
mod window;

pub use items::{Items, SliceItems};
pub use state::ListingState;
pub use window::{RESPECT_DISTANCE, find_window};

/// Handles every key in place of the built-in bindings (except Escape).
pub type KeyHandler = Arc<dyn Fn(Key, &State) -> HandlerAction + Send + Sync>;
/// Produces the entries matching a filter.
pub type ItemsGetter = Arc<dyn Fn(&str) -> Arc<dyn Items> + Send + Sync>;

/// How a listing is started.
#[derive(Clone, Default)]
pub struct StartConfig {
	/// Shown on the mode line.
	pub name: String,
	pub key_handler: Option<KeyHandler>,
	pub items_getter: Option<ItemsGetter>,
	/// Start with filtering on.
	pub start_filter: bool,
	/// Accept and leave as soon as filtering narrows the entries to one.
	pub auto_accept: bool,
	/// Select the last entry instead of the first after each refilter.
	pub select_last: bool,
}

impl fmt::Debug for StartConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StartConfig")
			.field("name", &self.name)
			.field("key_handler", &self.key_handler.is_some())
			.field("items_getter", &self.items_getter.is_some())
			.field("start_filter", &self.start_filter)
			.field("auto_accept", &self.auto_accept)
			.field("select_last", &self.select_last)
			.finish()
	}
}

#[derive(Debug, Default)]
struct Inner {
	config: StartConfig,
	state: ListingState,
}

/// The listing mode. Install it with [`State::set_mode`] after
/// [`start`](Self::start)ing it.
#[derive(Debug, Default)]
pub struct ListingMode {
	inner: Mutex<Inner>,
}

impl ListingMode {
	pub fn new() -> Self {
		Self::default()
	}

	/// A listing already started with `config`.
	pub fn started(config: StartConfig) -> Self {
		let mode = Self::new();
		mode.start(config);
		mode
	}

	/// Resets everything and loads the entries for the empty filter.
	pub fn start(&self, config: StartConfig) {
		tracing::debug!(name = %config.name, "listing.start");
		let state = ListingState::new(config.items_getter.clone(), config.start_filter, config.select_last);
		*self.inner.lock() = Inner { config, state };
	}

	/// Runs `f` on the listing state under its lock.
	pub fn mutate_state<R>(&self, f: impl FnOnce(&mut ListingState) -> R) -> R {
		f(&mut self.inner.lock().state)
	}

	/// A copy of the listing state.
	pub fn state(&self) -> ListingState {
		self.inner.lock().state.clone()
	}

	/// Accepts the selected entry.
	pub fn accept_item(&self, state: &State) {
		let (items, selected) = {
			let inner = self.inner.lock();
			(Arc::clone(inner.state.items()), inner.state.selected)
		};
		accept(items.as_ref(), selected, state);
	}

	/// Accepts the selected entry and leaves the mode.
	pub fn accept_item_and_close(&self, state: &State) {
		self.accept_item(state);
		state.set_mode(None);
	}

	/// Handles the state's binding key the way unbound keys are handled:
	/// while filtering, edits the filter; otherwise leaves the mode.
	pub fn default_handler(&self, state: &State) {
		if let Some(key) = state.binding_key() {
			self.handle_unbound(key, state);
		}
	}

	fn handle_unbound(&self, key: Key, state: &State) {
		let auto_accepted = {
			let mut inner = self.inner.lock();
			if !inner.state.filtering {
				drop(inner);
				state.set_mode(None);
				return;
			}
			let auto_accept = inner.config.auto_accept;
			let listing = &mut inner.state;
			if key.is_backspace() {
				listing.pop_filter();
			} else if key.is_printable()
				&& let Some(c) = key.codepoint()
			{
				let mut filter = listing.filter.clone();
				filter.push(c);
				listing.refilter(filter);
			} else {
				state.add_notice(format!("Unbound: {key}"));
			}
			(auto_accept && listing.items().len() == 1).then(|| Arc::clone(listing.items()))
		};

		if let Some(items) = auto_accepted {
			tracing::debug!("listing.auto_accept");
			accept(items.as_ref(), 0, state);
			state.set_mode(None);
		}
	}

	fn handle_key(&self, key: Key, state: &State) -> HandlerAction {
		if key.is_escape() {
			state.set_mode(None);
			return HandlerAction::NoAction;
		}
		let handler = self.inner.lock().config.key_handler.clone();
		match handler {
			Some(handler) => handler(key, state),
			None => self.default_binding(key, state),
		}
	}

	/// The built-in key table, for key handlers that only add a few keys.
	pub fn default_binding(&self, key: Key, state: &State) -> HandlerAction {
		if key.is_escape() {
			state.set_mode(None);
			return HandlerAction::NoAction;
		}
		let bound = {
			let mut inner = self.inner.lock();
			let listing = &mut inner.state;
			let op: Option<fn(&mut ListingState)> = match key {
				k if k == Key::new(KeyCode::Down) => Some(ListingState::down),
				k if k == Key::new(KeyCode::Up) => Some(ListingState::up),
				k if k == Key::new(KeyCode::Tab) => Some(ListingState::down_cycle),
				k if k == Key::new(KeyCode::Tab).with_shift() => Some(ListingState::up_cycle),
				k if k == Key::ctrl('F') => Some(ListingState::toggle_filtering),
				_ => None,
			};
			op.map(|op| op(listing)).is_some()
		};
		if !bound {
			self.handle_unbound(key, state);
		}
		HandlerAction::NoAction
	}
}

fn accept(items: &dyn Items, i: usize, state: &State) {
	if i >= items.len() {
		return;
	}
	if let Err(err) = items.accept(i, state) {
		tracing::debug!(%err, "listing.accept_error");
		state.add_notice(format!("[accept error] {err}"));
	}
}

impl Mode for ListingMode {
	fn mode_line(&self) -> Option<Box<dyn Renderer>> {
		let inner = self.inner.lock();
		Some(Box::new(ModeLineRenderer::new(&inner.config.name, inner.state.filter.clone())))
	}

	fn render_flags(&self) -> ModeRenderFlags {
		if self.inner.lock().state.filtering {
			ModeRenderFlags::CURSOR_ON_MODE_LINE
		} else {
			ModeRenderFlags::empty()
		}
	}

	fn handle_event(&self, event: &TtyEvent, state: &State) -> HandlerAction {
		match event {
			TtyEvent::Key(key) => self.handle_key(*key, state),
			TtyEvent::Mouse(_) | TtyEvent::Paste(_) | TtyEvent::NonfatalError(_) => HandlerAction::NoAction,
		}
	}

	fn lister(&self) -> Option<&dyn Lister> {
		Some(self)
	}
}

impl Lister for ListingMode {
	fn list(&self, max_height: usize) -> Box<dyn Renderer> {
		let mut inner = self.inner.lock();
		let listing = &mut inner.state;
		let items = Arc::clone(listing.items());

		let n = items.len();
		if n == 0 {
			return Box::new(StringRenderer("(no result)".into()));
		}
		let selected = listing.selected.min(n - 1);

		let (first, first_crop) = find_window(items.as_ref(), listing.first, selected, max_height);
		listing.first = first;

		let mut all_lines: Vec<StyledText> = Vec::new();
		let mut upper = n;
		let mut last_cropped = false;
		for i in first..n {
			let mut lines = items.show(i).split_lines();
			if i == first && first_crop > 0 {
				lines.drain(..first_crop.min(lines.len()));
			}
			if i == selected {
				lines = lines.into_iter().map(|l| l.with_modifier(Modifier::REVERSED)).collect();
			}
			if all_lines.len() + lines.len() > max_height {
				lines.truncate(max_height - all_lines.len());
				last_cropped = true;
			}
			all_lines.extend(lines);
			if all_lines.len() >= max_height {
				upper = i + 1;
				break;
			}
		}

		let base: Box<dyn Renderer> = Box::new(StyledLinesRenderer(all_lines));
		if first > 0 || first_crop > 0 || upper < n || last_cropped {
			Box::new(VerticalScrollbar::new(base, n, first, upper))
		} else {
			base
		}
	}
}
