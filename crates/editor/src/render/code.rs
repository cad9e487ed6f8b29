use shline_primitives::{Style, StyledText};
use shline_tui::BufferBuilder;

/// Writes the code area: prompt, code with the dot, right prompt.
///
/// Continuation lines are indented to the prompt when the prompt fits on one
/// line and takes less than half the width. The right prompt is only drawn
/// when at least one column separates it from the code.
pub fn render_code(bb: &mut BufferBuilder, prompt: &StyledText, code: &StyledText, dot: usize, rprompt: &StyledText) {
	bb.set_eager_wrap(true);

	bb.write_styled(prompt);
	let cursor = bb.cursor();
	if cursor.line == 0 && cursor.col * 2 < bb.width() {
		bb.set_indent(cursor.col);
	}

	let (before, after) = code.partition(dot);
	bb.write_styled(&before);
	bb.set_dot_here();
	bb.write_styled(&after);

	bb.set_eager_wrap(false);

	let rprompt_width = rprompt.width();
	if rprompt_width > 0
		&& let Some(padding) = bb.width().checked_sub(bb.cursor().col + rprompt_width)
		&& padding >= 1
	{
		bb.write_spaces(padding, Style::new());
		bb.write_styled(rprompt);
	}
}
