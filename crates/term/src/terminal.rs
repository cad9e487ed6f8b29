//! The crossterm-backed terminal.
//!
//! Frames are drawn inline below the shell output: the writer remembers the
//! last frame it drew and where it left the cursor, so the next frame starts
//! by moving back to the frame's first line.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveDown, MoveToColumn, MoveUp, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use futures::StreamExt;
use parking_lot::Mutex;
use shline_editor::{Tty, TtyError, TtyEvent, TtyGuard};
use shline_primitives::{Key, Style};
use shline_tui::Buffer;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const EVENT_BUFFER: usize = 256;
const FALLBACK_SIZE: (usize, usize) = (24, 80);

/// Writes frames to `out`, redrawing over the previous one.
pub struct FrameWriter<W: Write> {
	out: W,
	current: Option<Buffer>,
}

impl<W: Write> FrameWriter<W> {
	pub fn new(out: W) -> Self {
		Self { out, current: None }
	}

	pub fn current(&self) -> Option<&Buffer> {
		self.current.as_ref()
	}

	pub fn reset(&mut self) {
		self.current = None;
	}

	#[cfg(test)]
	pub fn output(&self) -> &W {
		&self.out
	}

	/// Moves the cursor from the dot of the current frame to the start of
	/// its first line.
	fn rewind(&mut self) -> io::Result<()> {
		if let Some(current) = &self.current {
			move_up(&mut self.out, current.dot.line)?;
		}
		queue!(self.out, MoveToColumn(0))
	}

	/// Draws `notes` above the frame area (they scroll up with the shell
	/// output) and replaces the current frame with `main`.
	pub fn commit(&mut self, notes: Option<&Buffer>, main: &Buffer, full: bool) -> io::Result<()> {
		queue!(self.out, Hide)?;
		self.rewind()?;
		if full || notes.is_some() {
			queue!(self.out, Clear(ClearType::FromCursorDown))?;
		}
		if let Some(notes) = notes {
			self.write_lines(notes)?;
			queue!(self.out, Print("\r\n"))?;
		}
		self.write_lines(main)?;
		queue!(self.out, Clear(ClearType::FromCursorDown))?;

		move_up(&mut self.out, main.height().saturating_sub(1).saturating_sub(main.dot.line))?;
		queue!(self.out, MoveToColumn(u16::try_from(main.dot.col).unwrap_or(u16::MAX)), Show)?;
		self.out.flush()?;
		self.current = Some(main.clone());
		Ok(())
	}

	/// Leaves the cursor on a fresh line below the current frame.
	pub fn newline(&mut self) -> io::Result<()> {
		if let Some(current) = &self.current {
			let below = current.height().saturating_sub(1).saturating_sub(current.dot.line);
			if below > 0 {
				queue!(self.out, MoveDown(u16::try_from(below).unwrap_or(u16::MAX)))?;
			}
		}
		queue!(self.out, Print("\r\n"))?;
		self.out.flush()
	}

	fn write_lines(&mut self, buffer: &Buffer) -> io::Result<()> {
		for (i, line) in buffer.lines.iter().enumerate() {
			if i > 0 {
				queue!(self.out, Print("\r\n"))?;
			}
			let mut style = Style::new();
			for cell in line {
				if cell.style != style {
					style = cell.style;
					queue!(self.out, Print(format!("\x1b[;{}m", style.sgr())))?;
				}
				queue!(self.out, Print(&cell.text))?;
			}
			if !style.is_plain() {
				queue!(self.out, Print("\x1b[m"))?;
			}
			queue!(self.out, Clear(ClearType::UntilNewLine))?;
		}
		Ok(())
	}
}

/// `MoveUp(0)` still moves one line on most terminals.
fn move_up(out: &mut impl Write, n: usize) -> io::Result<()> {
	if n == 0 {
		return Ok(());
	}
	queue!(out, MoveUp(u16::try_from(n).unwrap_or(u16::MAX)))
}

struct Input {
	stop: CancellationToken,
}

/// The controlling terminal on stdin/stdout.
pub struct CrosstermTty {
	writer: Mutex<FrameWriter<Stdout>>,
	input: Mutex<Option<Input>>,
}

impl CrosstermTty {
	pub fn new() -> Self {
		Self {
			writer: Mutex::new(FrameWriter::new(io::stdout())),
			input: Mutex::new(None),
		}
	}
}

fn convert(event: Event) -> Option<TtyEvent> {
	match event {
		Event::Key(key) => Key::from_crossterm(&key).map(TtyEvent::Key),
		Event::Mouse(mouse) => Some(TtyEvent::Mouse(mouse.into())),
		Event::Paste(text) => Some(TtyEvent::Paste(text)),
		// Resizes arrive as signals.
		Event::Resize(..) | Event::FocusGained | Event::FocusLost => None,
	}
}

impl Tty for CrosstermTty {
	fn setup(&self) -> Result<TtyGuard, TtyError> {
		enable_raw_mode().map_err(|err| TtyError::Setup(err.to_string()))?;
		if let Err(err) = execute!(io::stdout(), EnableBracketedPaste) {
			tracing::warn!(%err, "tty.bracketed_paste_unavailable");
		}
		Ok(TtyGuard::new(|| {
			if let Err(err) = execute!(io::stdout(), DisableBracketedPaste) {
				tracing::warn!(%err, "tty.restore_failed");
			}
			if let Err(err) = disable_raw_mode() {
				tracing::warn!(%err, "tty.restore_failed");
			}
		}))
	}

	fn start_input(&self) -> mpsc::Receiver<TtyEvent> {
		let (tx, rx) = mpsc::channel(EVENT_BUFFER);
		let stop = CancellationToken::new();
		if let Some(old) = self.input.lock().replace(Input { stop: stop.clone() }) {
			old.stop.cancel();
		}
		tokio::spawn(async move {
			tracing::trace!("tty.reader_start");
			let mut stream = EventStream::new();
			loop {
				let event = tokio::select! {
					() = stop.cancelled() => break,
					event = stream.next() => event,
				};
				let event = match event {
					Some(Ok(event)) => convert(event),
					Some(Err(err)) => Some(TtyEvent::NonfatalError(err.to_string())),
					None => break,
				};
				if let Some(event) = event
					&& tx.send(event).await.is_err()
				{
					break;
				}
			}
			tracing::trace!("tty.reader_stop");
		});
		rx
	}

	fn set_raw_input(&self, raw: bool) {
		// Escape sequences are always decoded by crossterm.
		tracing::trace!(raw, "tty.raw_input_unsupported");
	}

	fn stop_input(&self) {
		if let Some(input) = self.input.lock().take() {
			input.stop.cancel();
		}
	}

	fn size(&self) -> (usize, usize) {
		match crossterm::terminal::size() {
			Ok((cols, rows)) => (usize::from(rows), usize::from(cols)),
			Err(err) => {
				tracing::warn!(%err, "tty.size_unavailable");
				FALLBACK_SIZE
			}
		}
	}

	fn newline(&self) {
		if let Err(err) = self.writer.lock().newline() {
			tracing::warn!(%err, "tty.newline_failed");
		}
	}

	fn buffer(&self) -> Option<Buffer> {
		self.writer.lock().current().cloned()
	}

	fn reset_buffer(&self) {
		self.writer.lock().reset();
	}

	fn update_buffer(&self, notes: Option<&Buffer>, main: &Buffer, full: bool) -> Result<(), TtyError> {
		Ok(self.writer.lock().commit(notes, main, full)?)
	}
}
