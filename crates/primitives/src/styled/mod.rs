//! Styled text: a sequence of [`Span`]s, each a string with one [`Style`].
//!
//! Prompts, highlighted code and listing items all travel as [`StyledText`].

use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::style::{Modifier, Style};

#[cfg(test)]
mod tests;

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
	pub text: String,
	pub style: Style,
}

impl Span {
	pub fn new(text: impl Into<String>, style: Style) -> Self {
		Self {
			text: text.into(),
			style,
		}
	}

	pub fn raw(text: impl Into<String>) -> Self {
		Self::new(text, Style::new())
	}
}

/// Text made of styled spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
	pub spans: Vec<Span>,
}

impl StyledText {
	pub fn new() -> Self {
		Self::default()
	}

	/// Unstyled text. Empty input produces no spans.
	pub fn plain(text: impl Into<String>) -> Self {
		Self::styled(text, Style::new())
	}

	pub fn styled(text: impl Into<String>, style: Style) -> Self {
		let text = text.into();
		if text.is_empty() {
			return Self::new();
		}
		Self {
			spans: vec![Span::new(text, style)],
		}
	}

	/// Appends a span, merging with the last one when styles match.
	pub fn push(&mut self, span: Span) {
		if span.text.is_empty() {
			return;
		}
		if let Some(last) = self.spans.last_mut()
			&& last.style == span.style
		{
			last.text.push_str(&span.text);
			return;
		}
		self.spans.push(span);
	}

	pub fn push_str(&mut self, text: &str, style: Style) {
		self.push(Span::new(text, style));
	}

	/// Concatenation of `self` followed by `other`.
	pub fn concat(mut self, other: StyledText) -> Self {
		for span in other.spans {
			self.push(span);
		}
		self
	}

	pub fn is_empty(&self) -> bool {
		self.spans.iter().all(|s| s.text.is_empty())
	}

	/// Length of the underlying text in bytes.
	pub fn len(&self) -> usize {
		self.spans.iter().map(|s| s.text.len()).sum()
	}

	/// The text with styles dropped.
	pub fn to_plain(&self) -> String {
		self.spans.iter().map(|s| s.text.as_str()).collect()
	}

	/// Display width in terminal columns.
	pub fn width(&self) -> usize {
		self.spans.iter().map(|s| s.text.width()).sum()
	}

	/// Number of lines; empty text is one line.
	pub fn count_lines(&self) -> usize {
		1 + self.spans.iter().map(|s| s.text.matches('\n').count()).sum::<usize>()
	}

	/// Splits at byte offset `at` of the underlying text. Offsets past the end
	/// or inside a character are clamped to the nearest preceding boundary.
	pub fn partition(&self, at: usize) -> (StyledText, StyledText) {
		let mut before = StyledText::new();
		let mut after = StyledText::new();
		let mut offset = 0;
		for span in &self.spans {
			let end = offset + span.text.len();
			if end <= at {
				before.push(span.clone());
			} else if offset >= at {
				after.push(span.clone());
			} else {
				let mut cut = at - offset;
				while !span.text.is_char_boundary(cut) {
					cut -= 1;
				}
				before.push_str(&span.text[..cut], span.style);
				after.push_str(&span.text[cut..], span.style);
			}
			offset = end;
		}
		(before, after)
	}

	/// Splits on `\n`, keeping styles; always yields at least one line.
	pub fn split_lines(&self) -> Vec<StyledText> {
		let mut lines = vec![StyledText::new()];
		for span in &self.spans {
			for (i, part) in span.text.split('\n').enumerate() {
				if i > 0 {
					lines.push(StyledText::new());
				}
				if let Some(line) = lines.last_mut() {
					line.push_str(part, span.style);
				}
			}
		}
		lines
	}

	/// Applies `f` to the style of every span.
	pub fn map_style(mut self, f: impl Fn(Style) -> Style) -> Self {
		for span in &mut self.spans {
			span.style = f(span.style);
		}
		self
	}

	/// Adds `modifier` to every span, e.g. [`Modifier::REVERSED`] to mark a
	/// selected item.
	pub fn with_modifier(self, modifier: Modifier) -> Self {
		self.map_style(|s| s.add_modifier(modifier))
	}
}

impl From<&str> for StyledText {
	fn from(text: &str) -> Self {
		Self::plain(text)
	}
}

impl From<String> for StyledText {
	fn from(text: String) -> Self {
		Self::plain(text)
	}
}

impl From<Span> for StyledText {
	fn from(span: Span) -> Self {
		let mut text = Self::new();
		text.push(span);
		text
	}
}

impl FromIterator<Span> for StyledText {
	fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
		let mut text = Self::new();
		for span in iter {
			text.push(span);
		}
		text
	}
}

impl fmt::Display for StyledText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for span in &self.spans {
			f.write_str(&span.text)?;
		}
		Ok(())
	}
}
