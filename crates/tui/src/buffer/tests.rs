use pretty_assertions::assert_eq;
use rstest::rstest;
use shline_primitives::{Color, Style, StyledText};

use super::*;

fn lines_of(width: usize, f: impl FnOnce(&mut BufferBuilder)) -> (Vec<String>, Pos) {
	let mut bb = BufferBuilder::new(width);
	f(&mut bb);
	let cursor = bb.cursor();
	(bb.build().plain_lines(), cursor)
}

#[rstest]
#[case::fits("abc", 4, &["abc"], Pos::new(0, 3))]
#[case::exactly_full_no_eager("abc", 3, &["abc"], Pos::new(0, 3))]
#[case::wraps("abcd", 3, &["abc", "d"], Pos::new(1, 1))]
#[case::wide_char_moves_to_next_line("ab好", 3, &["ab", "好"], Pos::new(1, 2))]
#[case::explicit_newline("a\nb", 5, &["a", "b"], Pos::new(1, 1))]
#[case::caret_notation("a\tb\u{7f}", 10, &["a^Ib^?"], Pos::new(0, 6))]
fn write_and_wrap(#[case] text: &str, #[case] width: usize, #[case] want: &[&str], #[case] cursor: Pos) {
	let (lines, got_cursor) = lines_of(width, |bb| {
		bb.write_plain(text);
	});
	assert_eq!(lines, want);
	assert_eq!(got_cursor, cursor);
}

#[test]
fn eager_wrap_breaks_full_line() {
	let (lines, cursor) = lines_of(3, |bb| {
		bb.set_eager_wrap(true).write_plain("abc");
	});
	assert_eq!(lines, vec!["abc", ""]);
	assert_eq!(cursor, Pos::new(1, 0));
}

#[rstest]
#[case::fits("abc", &["abc"])]
#[case::cut("abcdef", &["abc"])]
#[case::wide_char_ends_the_line("ab好c", &["ab"])]
#[case::each_line_cut("abcd\nxy\n12345", &["abc", "xy", "123"])]
fn clip_drops_overflow(#[case] text: &str, #[case] want: &[&str]) {
	let (lines, _) = lines_of(3, |bb| {
		bb.set_clip(true).set_eager_wrap(true).write_plain(text);
	});
	assert_eq!(lines, want);
}

#[test]
fn indent_applies_to_continuation_lines() {
	let (lines, cursor) = lines_of(4, |bb| {
		bb.write_plain("> ").set_indent(2).write_plain("abcdef");
	});
	assert_eq!(lines, vec!["> ab", "  cd", "  ef"]);
	assert_eq!(cursor, Pos::new(2, 4));
}

#[test]
fn styled_text_keeps_styles() {
	let red = Style::new().fg(Color::Red);
	let mut bb = BufferBuilder::new(10);
	bb.write_styled(&StyledText::plain("a").concat(StyledText::styled("b", red)));
	let buf = bb.build();
	assert_eq!(buf.lines[0], vec![Cell::new("a", Style::new()), Cell::new("b", red)]);
}

#[test]
fn builder_extend_moves_dot() {
	let mut inner = BufferBuilder::new(5);
	inner.write_plain("xy").set_dot_here();
	let inner = inner.build();

	let mut bb = BufferBuilder::new(5);
	bb.write_plain("top").extend(&inner, true);
	let buf = bb.build();
	assert_eq!(buf.plain_lines(), vec!["top", "xy"]);
	assert_eq!(buf.dot, Pos::new(1, 2));
}

#[test]
fn trim_keeps_dot_inside() {
	let mut bb = BufferBuilder::new(2);
	bb.write_plain("aabbccdd");
	bb.set_dot(Pos::new(3, 1));
	let mut buf = bb.build();
	buf.trim_to_lines(1, 3);
	assert_eq!(buf.plain_lines(), vec!["bb", "cc"]);
	assert_eq!(buf.dot, Pos::new(1, 1));
}

#[test]
fn extend_right_pads_and_appends() {
	let mut left = BufferBuilder::new(3);
	left.write_plain("a\nbcd");
	let mut left = left.build();
	let mut right = BufferBuilder::new(1);
	right.write_plain("|\n|\n|");
	left.extend_right(&right.build());
	assert_eq!(left.width, 4);
	assert_eq!(left.plain_lines(), vec!["a  |", "bcd|", "   |"]);
}

#[test]
fn height_sums_present_buffers() {
	let one = Buffer::new(3);
	let mut two = BufferBuilder::new(3);
	two.write_plain("x\ny");
	let two = two.build();
	assert_eq!(buffers_height(&[Some(&one), None, Some(&two)]), 3);
}
