use shline_primitives::{Style, StyledText};
use unicode_segmentation::UnicodeSegmentation;

use super::{Buffer, Cell, Pos, str_width};

/// Incrementally lays out text into a [`Buffer`] of fixed width.
///
/// Text wraps when the next grapheme would overflow the line. With eager wrap
/// a new line is started as soon as a line becomes exactly full, so the
/// cursor never sits past the last column. Each wrapped or explicit new line
/// starts with `indent` spaces. With clipping, text past the width is
/// dropped instead of wrapped. Control characters are written in caret
/// notation (`^X`).
#[derive(Debug, Clone)]
pub struct BufferBuilder {
	width: usize,
	col: usize,
	indent: usize,
	eager_wrap: bool,
	clip: bool,
	clipped: bool,
	lines: Vec<Vec<Cell>>,
	dot: Pos,
}

impl BufferBuilder {
	pub fn new(width: usize) -> Self {
		Self {
			width,
			col: 0,
			indent: 0,
			eager_wrap: false,
			clip: false,
			clipped: false,
			lines: vec![Vec::new()],
			dot: Pos::default(),
		}
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn indent(&self) -> usize {
		self.indent
	}

	pub fn set_indent(&mut self, indent: usize) -> &mut Self {
		self.indent = indent;
		self
	}

	pub fn set_eager_wrap(&mut self, eager_wrap: bool) -> &mut Self {
		self.eager_wrap = eager_wrap;
		self
	}

	pub fn set_clip(&mut self, clip: bool) -> &mut Self {
		self.clip = clip;
		self
	}

	/// Position where the next cell would be written.
	pub fn cursor(&self) -> Pos {
		Pos::new(self.lines.len() - 1, self.col)
	}

	pub fn set_dot(&mut self, dot: Pos) -> &mut Self {
		self.dot = dot;
		self
	}

	/// Puts the dot at the current cursor position.
	pub fn set_dot_here(&mut self) -> &mut Self {
		self.dot = self.cursor();
		self
	}

	/// Starts a new line, filled with the indent.
	pub fn newline(&mut self) -> &mut Self {
		self.lines.push((0..self.indent).map(|_| Cell::space()).collect());
		self.col = self.indent;
		self.clipped = false;
		self
	}

	fn write_cell(&mut self, text: &str, style: Style) {
		if self.clipped {
			return;
		}
		let w = str_width(text);
		if self.col + w > self.width {
			if self.clip {
				self.clipped = true;
				return;
			}
			self.newline();
		}
		if let Some(line) = self.lines.last_mut() {
			line.push(Cell::new(text, style));
		}
		self.col += w;
		if self.eager_wrap && !self.clip && self.col == self.width {
			self.newline();
		}
	}

	pub fn write_str(&mut self, text: &str, style: Style) -> &mut Self {
		for g in text.graphemes(true) {
			match g {
				"\n" | "\r\n" => {
					self.newline();
				}
				_ => match g.chars().next() {
					Some(c) if g.len() == c.len_utf8() && (c < ' ' || c == '\u{7f}') => {
						let caret = char::from((c as u8) ^ 0x40);
						self.write_cell(&format!("^{caret}"), style);
					}
					_ => self.write_cell(g, style),
				},
			}
		}
		self
	}

	pub fn write_plain(&mut self, text: &str) -> &mut Self {
		self.write_str(text, Style::new())
	}

	pub fn write_spaces(&mut self, n: usize, style: Style) -> &mut Self {
		for _ in 0..n {
			self.write_cell(" ", style);
		}
		self
	}

	pub fn write_styled(&mut self, text: &StyledText) -> &mut Self {
		for span in &text.spans {
			self.write_str(&span.text, span.style);
		}
		self
	}

	/// Appends the lines of `buffer` as new lines. With `move_dot` the dot
	/// follows into the appended buffer.
	pub fn extend(&mut self, buffer: &Buffer, move_dot: bool) -> &mut Self {
		if move_dot {
			self.dot = Pos::new(self.lines.len() + buffer.dot.line, buffer.dot.col);
		}
		self.lines.extend(buffer.lines.iter().cloned());
		self.col = buffer.line_width(buffer.lines.len().saturating_sub(1));
		self
	}

	pub fn build(self) -> Buffer {
		Buffer {
			width: self.width,
			lines: self.lines,
			dot: self.dot,
		}
	}
}
