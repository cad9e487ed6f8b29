//! Frame layout.
//!
//! [`render`] turns one snapshot of the editor into a notes frame and a main
//! frame. The main frame stacks the code area (prompt, code, right prompt and
//! highlight errors), the mode line and the mode's panel. When they do not fit
//! in the height, space is taken away in this order:
//!
//! 1. the panel gets whatever code and mode line leave;
//! 2. the code area is cropped to a window around the dot;
//! 3. the mode line is cut to its first line;
//! 4. the mode line is dropped and only the dot's line of code is shown.

use std::sync::Arc;

use shline_primitives::StyledText;
use shline_tui::{Buffer, BufferBuilder, LinesRenderer, Pos, Renderer};

use crate::mode::{Mode, ModeRenderFlags};

mod code;

pub use code::render_code;

/// Everything a frame is made from.
#[derive(Clone)]
pub struct RenderSetup {
	pub height: usize,
	pub width: usize,
	pub prompt: StyledText,
	pub rprompt: StyledText,
	pub code: StyledText,
	/// Byte offset of the dot in `code`.
	pub dot: usize,
	/// Highlight errors, one line each under the code.
	pub errors: Vec<String>,
	pub notes: Vec<String>,
	pub mode: Arc<dyn Mode>,
}

/// Lays out a frame: the notes (when there are any) and the main buffer.
pub fn render(setup: &RenderSetup) -> (Option<Buffer>, Buffer) {
	let notes = (!setup.notes.is_empty()).then(|| LinesRenderer(setup.notes.clone()).render(setup.width));

	let mut bb = BufferBuilder::new(setup.width);
	render_code(&mut bb, &setup.prompt, &setup.code, setup.dot, &setup.rprompt);
	if !setup.errors.is_empty() {
		bb.extend(&LinesRenderer(setup.errors.clone()).render(setup.width), false);
	}
	let code = bb.build();

	(notes, layout(setup.height, setup.width, code, setup.mode.as_ref()))
}

/// Stacks the code buffer, the mode line and the panel within `height`.
fn layout(height: usize, width: usize, mut code: Buffer, mode: &dyn Mode) -> Buffer {
	let flags = mode.render_flags();
	let mut mode_line = mode.mode_line().map(|r| r.render(width));
	let mode_height = mode_line.as_ref().map_or(0, Buffer::height);
	let code_height = code.height();

	let mut panel_height = 0;
	if height >= code_height + mode_height {
		panel_height = height - code_height - mode_height;
	} else if height > mode_height {
		let (low, high) = window_around(code.dot.line, code_height, height - mode_height);
		code.trim_to_lines(low, high);
	} else if height >= 2 {
		if let Some(line) = mode_line.as_mut() {
			line.trim_to_lines(0, 1);
		}
		let (low, high) = window_around(code.dot.line, code_height, height - 1);
		code.trim_to_lines(low, high);
	} else {
		mode_line = None;
		let dot_line = code.dot.line;
		code.trim_to_lines(dot_line, dot_line + 1);
	}

	let mut panel = None;
	if panel_height > 0
		&& let Some(lister) = mode.lister()
	{
		panel = Some(lister.list(panel_height).render(width));
		// Redrawing the mode line never adds lines, so the layout holds.
		if flags.contains(ModeRenderFlags::REDRAW_MODE_LINE_AFTER_LIST) {
			mode_line = mode.mode_line().map(|r| r.render(width));
		}
	}

	let mut main = Buffer {
		width,
		lines: Vec::new(),
		dot: Pos::default(),
	};
	main.extend(&code, true);
	if let Some(line) = &mode_line {
		main.extend(line, flags.contains(ModeRenderFlags::CURSOR_ON_MODE_LINE));
	}
	if let Some(panel) = &panel {
		main.extend(panel, false);
	}
	main
}

/// A window of `size` lines out of `n` centered on line `i`, shifted to stay
/// inside `0..n`.
pub(crate) fn window_around(i: usize, n: usize, size: usize) -> (usize, usize) {
	let Some(low) = i.checked_sub(size / 2) else {
		return (0, size);
	};
	let high = low + size;
	if high > n {
		(n.saturating_sub(size), n)
	} else {
		(low, high)
	}
}
