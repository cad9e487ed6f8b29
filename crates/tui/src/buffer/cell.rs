use shline_primitives::Style;
use unicode_width::UnicodeWidthStr;

/// One grapheme on screen with its style.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
	pub text: String,
	pub style: Style,
}

impl Cell {
	pub fn new(text: impl Into<String>, style: Style) -> Self {
		Self {
			text: text.into(),
			style,
		}
	}

	/// A plain single space.
	pub fn space() -> Self {
		Self::new(" ", Style::new())
	}

	/// Display width in columns.
	pub fn width(&self) -> usize {
		self.text.width()
	}
}
