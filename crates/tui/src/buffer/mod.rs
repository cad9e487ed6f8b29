//! The [`Buffer`] frame type and its [`BufferBuilder`].

use unicode_width::UnicodeWidthStr;

mod builder;
mod cell;
#[cfg(test)]
mod tests;

pub use builder::BufferBuilder;
pub use cell::Cell;

/// A position in a buffer, counted in lines and display columns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
	pub line: usize,
	pub col: usize,
}

impl Pos {
	pub const fn new(line: usize, col: usize) -> Self {
		Self { line, col }
	}
}

/// A rendered frame: lines of cells no wider than `width`, plus the dot.
///
/// Buffers always have at least one line, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
	pub width: usize,
	pub lines: Vec<Vec<Cell>>,
	pub dot: Pos,
}

impl Buffer {
	/// A buffer holding a single empty line.
	pub fn new(width: usize) -> Self {
		Self {
			width,
			lines: vec![Vec::new()],
			dot: Pos::default(),
		}
	}

	pub fn height(&self) -> usize {
		self.lines.len()
	}

	/// Keeps lines `low..high`, shifting the dot with them. The dot stays
	/// inside the kept range.
	pub fn trim_to_lines(&mut self, low: usize, high: usize) {
		let high = high.min(self.lines.len());
		let low = low.min(high);
		self.lines.truncate(high);
		self.lines.drain(..low);
		if self.lines.is_empty() {
			self.lines.push(Vec::new());
		}
		self.dot.line = self.dot.line.saturating_sub(low).min(self.lines.len() - 1);
	}

	/// Appends the lines of `other` below this buffer. With `move_dot`, the
	/// dot follows into `other`.
	pub fn extend(&mut self, other: &Buffer, move_dot: bool) {
		if move_dot {
			self.dot = Pos::new(self.lines.len() + other.dot.line, other.dot.col);
		}
		self.lines.extend(other.lines.iter().cloned());
	}

	/// Places `other` to the right: every line is padded to this buffer's
	/// width before the corresponding line of `other` is appended.
	pub fn extend_right(&mut self, other: &Buffer) {
		let w = self.width;
		self.width += other.width;
		for (i, right) in other.lines.iter().enumerate() {
			if i == self.lines.len() {
				self.lines.push(Vec::new());
			}
			let line = &mut self.lines[i];
			let used: usize = line.iter().map(Cell::width).sum();
			line.extend((used..w).map(|_| Cell::space()));
			line.extend(right.iter().cloned());
		}
	}

	/// Width of the line at `index`.
	pub fn line_width(&self, index: usize) -> usize {
		self.lines.get(index).map_or(0, |line| line.iter().map(Cell::width).sum())
	}

	/// Text of every line with styles dropped.
	pub fn plain_lines(&self) -> Vec<String> {
		self.lines
			.iter()
			.map(|line| line.iter().map(|c| c.text.as_str()).collect())
			.collect()
	}
}

/// Total number of lines of the buffers that are present.
pub fn buffers_height(buffers: &[Option<&Buffer>]) -> usize {
	buffers.iter().flatten().map(|b| b.height()).sum()
}

pub(crate) fn str_width(s: &str) -> usize {
	s.width()
}
