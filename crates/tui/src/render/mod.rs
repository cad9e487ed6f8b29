//! The [`Renderer`] trait and the stock renderers used by the editor.

use shline_primitives::{Color, Modifier, Style, StyledText};

use crate::buffer::{Buffer, BufferBuilder};

#[cfg(test)]
mod tests;

/// Style of the mode name on a mode line.
pub const MODE_TITLE_STYLE: Style = Style::new()
	.fg(Color::White)
	.bg(Color::Magenta)
	.add_modifier(Modifier::BOLD);
/// Style of the filter text on a mode line.
pub const FILTER_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
/// Scrollbar part covering the visible window.
pub const SCROLLBAR_THUMB_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::REVERSED);
/// Scrollbar part outside the visible window.
pub const SCROLLBAR_TROUGH_STYLE: Style = Style::new().fg(Color::Magenta);

/// Something that can lay itself out into a buffer of a given width.
pub trait Renderer: Send {
	fn render(&self, width: usize) -> Buffer;
}

/// Renders `renderer` at `width`.
pub fn render(renderer: &dyn Renderer, width: usize) -> Buffer {
	renderer.render(width)
}

/// Plain string, wrapped at the width.
#[derive(Debug, Clone)]
pub struct StringRenderer(pub String);

impl Renderer for StringRenderer {
	fn render(&self, width: usize) -> Buffer {
		let mut bb = BufferBuilder::new(width);
		bb.write_plain(&self.0);
		bb.build()
	}
}

/// One plain line per entry.
#[derive(Debug, Clone)]
pub struct LinesRenderer(pub Vec<String>);

impl Renderer for LinesRenderer {
	fn render(&self, width: usize) -> Buffer {
		let mut bb = BufferBuilder::new(width);
		for (i, line) in self.0.iter().enumerate() {
			if i > 0 {
				bb.newline();
			}
			bb.write_plain(line);
		}
		bb.build()
	}
}

/// One styled line per entry. Lines wider than the width are clipped, so the
/// buffer is exactly as tall as the entry list.
#[derive(Debug, Clone)]
pub struct StyledLinesRenderer(pub Vec<StyledText>);

impl Renderer for StyledLinesRenderer {
	fn render(&self, width: usize) -> Buffer {
		let mut bb = BufferBuilder::new(width);
		bb.set_clip(true);
		for (i, line) in self.0.iter().enumerate() {
			if i > 0 {
				bb.newline();
			}
			bb.write_styled(line);
		}
		bb.build()
	}
}

/// The line naming the active mode, with the mode's filter text after it.
/// The dot sits at the end of the filter.
#[derive(Debug, Clone)]
pub struct ModeLineRenderer {
	title: StyledText,
	filter: String,
}

impl ModeLineRenderer {
	/// Mode line for `name`, shown as ` NAME ` in the title style.
	pub fn new(name: &str, filter: impl Into<String>) -> Self {
		Self {
			title: StyledText::styled(format!(" {name} "), MODE_TITLE_STYLE),
			filter: filter.into(),
		}
	}
}

impl Renderer for ModeLineRenderer {
	fn render(&self, width: usize) -> Buffer {
		let mut bb = BufferBuilder::new(width);
		bb.write_styled(&self.title)
			.write_spaces(1, Style::new())
			.write_str(&self.filter, FILTER_STYLE)
			.set_dot_here();
		bb.build()
	}
}

/// Wraps a renderer, reserving the last column for a scrollbar showing that
/// items `low..high` of `n` are visible.
pub struct VerticalScrollbar {
	pub base: Box<dyn Renderer>,
	pub n: usize,
	pub low: usize,
	pub high: usize,
}

impl VerticalScrollbar {
	pub fn new(base: Box<dyn Renderer>, n: usize, low: usize, high: usize) -> Self {
		Self { base, n, low, high }
	}
}

impl Renderer for VerticalScrollbar {
	fn render(&self, width: usize) -> Buffer {
		let mut buf = self.base.render(width.saturating_sub(1));
		let bar = scrollbar(self.n, self.low, self.high, buf.height());
		buf.extend_right(&bar);
		buf
	}
}

/// Rows of the thumb, as a half-open interval. The thumb length depends only
/// on `n`, `height` and the window size, and is never zero.
fn thumb_interval(n: usize, low: usize, high: usize, height: usize) -> (usize, usize) {
	if n == 0 {
		return (0, height);
	}
	let scale = |i: usize| (i as f64 / n as f64 * height as f64 + 0.5) as usize;
	let mut thumb_low = scale(low);
	let mut thumb_high = thumb_low + scale(high.saturating_sub(low));
	if thumb_low == thumb_high {
		if thumb_high >= height {
			thumb_low = thumb_low.saturating_sub(1);
		} else {
			thumb_high += 1;
		}
	}
	(thumb_low, thumb_high.min(height))
}

fn scrollbar(n: usize, low: usize, high: usize, height: usize) -> Buffer {
	let (thumb_low, thumb_high) = thumb_interval(n, low, high, height);
	let mut bb = BufferBuilder::new(1);
	for row in 0..height {
		if row > 0 {
			bb.newline();
		}
		if (thumb_low..thumb_high).contains(&row) {
			bb.write_str(" ", SCROLLBAR_THUMB_STYLE);
		} else {
			bb.write_str("│", SCROLLBAR_TROUGH_STYLE);
		}
	}
	bb.build()
}
