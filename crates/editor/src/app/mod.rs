//! The read-code orchestrator.
//!
//! An [`App`] runs one [`read_code`](App::read_code) session at a time. A
//! session acquires the terminal, starts the producers (late updates of the
//! highlighter and prompts, OS signals) and then loops over whichever comes
//! first: a terminal event, a late update, a signal or a redraw request. The
//! loop is the only consumer of those channels and the only place frames are
//! drawn from.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use shline_primitives::StyledText;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::highlight::{Highlighter, NoHighlighter};
use crate::mode::{BasicMode, HandlerAction, Mode};
use crate::prompt::{ConstPrompt, Prompt};
use crate::render::{RenderSetup, render};
use crate::signal::{NoSignals, Signal, SignalSource};
use crate::state::State;
use crate::tty::{Tty, TtyError, TtyEvent};
use crate::worker::TaskClass;

mod producers;

use producers::Producers;

/// Signals queued before the loop gets to them.
const SIGNAL_BUFFER: usize = 16;

/// Why a session ended without code.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
	/// The terminal could not be set up; nothing was drawn.
	#[error(transparent)]
	Setup(TtyError),
	/// The terminal hung up or closed its input.
	#[error("end of input")]
	Eof,
}

type BeforeRead = Arc<dyn Fn() + Send + Sync>;
type AfterRead = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct Hooks {
	before: Vec<BeforeRead>,
	after: Vec<AfterRead>,
}

/// How a session left the loop.
enum Exit {
	Commit,
	Eof,
}

/// The live part of a session: redraw requests, producers and terminal input.
///
/// [`close`](Session::close) ends it in order. If `read_code` is dropped
/// before that, dropping the session ends it without waiting: redraws and raw
/// input stop being forwarded, producers are cancelled and input stops.
struct Session<'a> {
	app: &'a App,
	producers: Producers,
	closed: bool,
}

impl Session<'_> {
	async fn close(&mut self) {
		*self.app.redraw_tx.lock() = None;
		self.producers.shutdown().await;
		self.app.tty.stop_input();
		self.closed = true;
	}
}

impl Drop for Session<'_> {
	fn drop(&mut self) {
		if self.closed {
			return;
		}
		tracing::debug!("session.cancelled");
		*self.app.redraw_tx.lock() = None;
		self.app.tty.stop_input();
	}
}

/// The line editor.
pub struct App {
	tty: Arc<dyn Tty>,
	signals: Arc<dyn SignalSource>,
	state: Arc<State>,
	config: Arc<RwLock<Config>>,
	highlighter: Arc<dyn Highlighter>,
	prompt: Arc<dyn Prompt>,
	rprompt: Arc<dyn Prompt>,
	default_mode: Arc<dyn Mode>,
	hooks: Mutex<Hooks>,
	/// Redraw requests of the running session; `None` between sessions.
	redraw_tx: Mutex<Option<mpsc::UnboundedSender<bool>>>,
	active: Arc<AtomicUsize>,
}

impl fmt::Debug for App {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("App")
			.field("config", &*self.config.read())
			.field("in_session", &self.redraw_tx.lock().is_some())
			.field("active_producers", &self.active_producers())
			.finish_non_exhaustive()
	}
}

impl App {
	/// An editor on `tty` with no prompts, no highlighting, no signals and
	/// [`BasicMode`] as the default mode.
	pub fn new(tty: Arc<dyn Tty>) -> Self {
		Self {
			tty,
			signals: Arc::new(NoSignals),
			state: Arc::new(State::new()),
			config: Arc::new(RwLock::new(Config::default())),
			highlighter: Arc::new(NoHighlighter),
			prompt: Arc::new(ConstPrompt::new(StyledText::new())),
			rprompt: Arc::new(ConstPrompt::new(StyledText::new())),
			default_mode: Arc::new(BasicMode),
			hooks: Mutex::new(Hooks::default()),
			redraw_tx: Mutex::new(None),
			active: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn with_signals(mut self, signals: Arc<dyn SignalSource>) -> Self {
		self.signals = signals;
		self
	}

	pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
		self.highlighter = highlighter;
		self
	}

	pub fn with_prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
		self.prompt = prompt;
		self
	}

	pub fn with_rprompt(mut self, rprompt: Arc<dyn Prompt>) -> Self {
		self.rprompt = rprompt;
		self
	}

	/// The mode used while the state has none.
	pub fn with_default_mode(mut self, mode: Arc<dyn Mode>) -> Self {
		self.default_mode = mode;
		self
	}

	pub fn with_config(self, config: Config) -> Self {
		*self.config.write() = config;
		self
	}

	pub fn state(&self) -> &Arc<State> {
		&self.state
	}

	/// The live configuration, read on every redraw.
	pub fn config(&self) -> &Arc<RwLock<Config>> {
		&self.config
	}

	/// Number of producer tasks still running.
	pub fn active_producers(&self) -> usize {
		self.active.load(Ordering::SeqCst)
	}

	/// Adds a notice and asks for a redraw.
	pub fn notify(&self, text: impl Into<String>) {
		self.state.add_notice(text);
		self.redraw(false);
	}

	/// Asks the running session to redraw. Does nothing between sessions.
	pub fn redraw(&self, full: bool) {
		if let Some(tx) = self.redraw_tx.lock().as_ref() {
			let _ = tx.send(full);
		}
	}

	/// Forwards to the terminal while a session is running.
	pub fn set_raw_input(&self, raw: bool) {
		if self.redraw_tx.lock().is_some() {
			self.tty.set_raw_input(raw);
		}
	}

	/// Runs `hook` once per session, after the terminal is set up and before
	/// the first event.
	pub fn add_before_read(&self, hook: impl Fn() + Send + Sync + 'static) {
		self.hooks.lock().before.push(Arc::new(hook));
	}

	/// Runs `hook` once per session with the final code, after the terminal
	/// is released.
	pub fn add_after_read(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
		self.hooks.lock().after.push(Arc::new(hook));
	}

	/// Reads one piece of code from the terminal.
	pub async fn read_code(&self) -> Result<String, ReadError> {
		let guard = self.tty.setup().map_err(ReadError::Setup)?;
		tracing::debug!("session.start");
		self.state.reset();

		let mut events = self.tty.start_input();
		let (redraw_tx, mut redraw_rx) = mpsc::unbounded_channel();
		*self.redraw_tx.lock() = Some(redraw_tx);
		let mut session = Session {
			app: self,
			producers: Producers::new(Arc::clone(&self.active)),
			closed: false,
		};

		let (late_tx, mut late_rx) = mpsc::channel(1);
		let (signal_tx, mut signal_rx) = mpsc::channel(SIGNAL_BUFFER);
		let sources = [
			self.highlighter.late_updates(),
			self.prompt.late_updates(),
			self.rprompt.late_updates(),
		];
		for updates in sources.into_iter().flatten() {
			session.producers.relay(updates, late_tx.clone());
		}
		drop(late_tx);
		let signals = Arc::clone(&self.signals);
		session.producers.spawn(TaskClass::Signals, |stop| async move {
			signals.run(signal_tx, stop).await;
		});

		self.prompt.trigger(true);
		self.rprompt.trigger(true);
		let before = self.hooks.lock().before.clone();
		for hook in &before {
			hook();
		}
		self.draw(false, false);

		let exit = loop {
			tokio::select! {
				event = events.recv() => {
					let Some(event) = event else {
						tracing::debug!("session.input_closed");
						break Exit::Eof;
					};
					if self.handle_event(&event) == HandlerAction::CommitCode {
						break Exit::Commit;
					}
					self.draw(false, false);
				}
				Some(()) = late_rx.recv() => self.draw(false, false),
				Some(full) = redraw_rx.recv() => self.draw(full, false),
				Some(signal) = signal_rx.recv() => match signal {
					Signal::Resize => {
						self.prompt.trigger(false);
						self.rprompt.trigger(false);
						self.draw(true, false);
					}
					Signal::Interrupt => {
						tracing::debug!("session.interrupt");
						self.state.reset();
						self.draw(true, false);
					}
					Signal::Hangup => break Exit::Eof,
					Signal::Other(signo) => tracing::trace!(signo, "session.signal_ignored"),
				},
			}
		};

		session.close().await;
		drop((late_rx, signal_rx, redraw_rx));
		drop(events);

		self.draw(false, true);
		self.tty.newline();
		self.tty.reset_buffer();
		drop(guard);

		let code = self.state.code();
		self.state.reset();
		tracing::debug!(committed = matches!(exit, Exit::Commit), "session.end");

		let after = self.hooks.lock().after.clone();
		for hook in &after {
			hook(&code);
		}
		match exit {
			Exit::Commit => Ok(code),
			Exit::Eof => Err(ReadError::Eof),
		}
	}

	fn handle_event(&self, event: &TtyEvent) -> HandlerAction {
		if let TtyEvent::NonfatalError(err) = event {
			self.state.add_notice(format!("[tty error] {err}"));
			return HandlerAction::NoAction;
		}
		let mode = self.state.mode().unwrap_or_else(|| Arc::clone(&self.default_mode));
		mode.handle_event(event, &self.state)
	}

	/// Renders the state and commits the frame. The final frame is drawn from
	/// the finalized state and drops the right prompt unless it persists.
	fn draw(&self, full: bool, last: bool) {
		let raw = if last {
			self.state.finalize()
		} else {
			self.state.pop_for_redraw()
		};
		let (code, dot) = raw.display_code();
		let (code, errors) = self.highlighter.get(&code);
		let (rows, width) = self.tty.size();
		let config = self.config.read().clone();

		let rprompt = if last && !config.rprompt_persistent {
			StyledText::new()
		} else {
			self.rprompt.get()
		};
		let setup = RenderSetup {
			height: config.effective_height(rows),
			width,
			prompt: self.prompt.get(),
			rprompt,
			code,
			dot,
			errors,
			notes: raw.notes,
			mode: raw.mode.unwrap_or_else(|| Arc::clone(&self.default_mode)),
		};
		let (notes, main) = render(&setup);
		if let Err(err) = self.tty.update_buffer(notes.as_ref(), &main, full) {
			tracing::warn!(%err, "frame.commit_failed");
		}
	}
}
