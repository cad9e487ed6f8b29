//! Interactive line-editing engine for a shell prompt.
//!
//! The engine owns the terminal for the duration of one [`App::read_code`]
//! session. Terminal events are handed to the current [`Mode`], which edits
//! the shared [`State`]; the read loop redraws through the layout engine in
//! [`render`] and also wakes up for highlighter and prompt late updates,
//! OS signals and caller-requested redraws.

#![cfg_attr(test, allow(unused_crate_dependencies))]

/// The read-code orchestrator.
pub mod app;
/// Key binding dispatch, binding values and builtin bindings.
pub mod binding;
/// Editor configuration.
pub mod config;
/// Syntax highlighter capability.
pub mod highlight;
/// The generic listing (picker) mode.
pub mod listing;
/// Mode abstraction and the basic and binding-driven modes.
pub mod mode;
/// Pickers built on the listing mode.
pub mod pickers;
/// Prompt capability.
pub mod prompt;
/// Frame layout.
pub mod render;
/// OS signal capability.
pub mod signal;
/// Shared editor state.
pub mod state;
/// Terminal capability.
pub mod tty;
mod worker;

#[cfg(test)]
pub(crate) mod testutil;

pub use app::{App, ReadError};
pub use binding::{Binding, BindingContext, BindingError, BindingTable, Dispatcher, SharedBindings, Value};
pub use config::{Config, ConfigError};
pub use highlight::{AsyncHighlighter, Highlighter, NoHighlighter};
pub use listing::{Items, ListingMode, ListingState, SliceItems, StartConfig};
pub use mode::{BasicMode, BindingMode, HandlerAction, Lister, Mode, ModeRenderFlags};
pub use prompt::{ComputedPrompt, ConstPrompt, Prompt};
pub use signal::{NoSignals, Signal, SignalSource};
pub use state::{PendingCode, RawState, State};
pub use tty::{Tty, TtyError, TtyEvent, TtyGuard};
