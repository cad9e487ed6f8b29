use std::io;

use super::Value;
use crate::state::State;

/// Output port of a binding: values and complete byte lines become notices.
///
/// Bytes are buffered until a newline; a trailing partial line is flushed as
/// its own notice when the port is closed or dropped.
pub struct NoticePort<'a> {
	state: &'a State,
	pending: Vec<u8>,
	closed: bool,
}

impl<'a> NoticePort<'a> {
	pub(crate) fn new(state: &'a State) -> Self {
		Self {
			state,
			pending: Vec::new(),
			closed: false,
		}
	}

	pub fn put(&mut self, value: Value) {
		self.state.add_notice(format!("[value out] {}", value.repr()));
	}

	fn emit_line(&self, line: &[u8]) {
		self.state
			.add_notice(format!("[bytes out] {}", String::from_utf8_lossy(line)));
	}

	/// Flushes a trailing partial line. Further writes are rejected.
	pub fn close(&mut self) {
		if self.closed {
			return;
		}
		self.closed = true;
		if !self.pending.is_empty() {
			let rest = std::mem::take(&mut self.pending);
			self.emit_line(&rest);
		}
	}
}

impl io::Write for NoticePort<'_> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		if self.closed {
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "port closed"));
		}
		self.pending.extend_from_slice(buf);
		while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
			let line: Vec<u8> = self.pending.drain(..=pos).collect();
			self.emit_line(&line[..pos]);
		}
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Drop for NoticePort<'_> {
	fn drop(&mut self) {
		self.close();
	}
}
