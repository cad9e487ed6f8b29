use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::style::Color;

fn red() -> Style {
	Style::new().fg(Color::Red)
}

#[test]
fn push_merges_equal_styles() {
	let mut text = StyledText::plain("ab");
	text.push_str("cd", Style::new());
	text.push_str("ef", red());
	text.push_str("", Style::new());
	assert_eq!(text.spans, vec![Span::raw("abcd"), Span::new("ef", red())]);
}

#[test]
fn partition_inside_span() {
	let text = StyledText::plain("ab").concat(StyledText::styled("cd", red()));
	let (before, after) = text.partition(3);
	assert_eq!(before, StyledText::plain("ab").concat(StyledText::styled("c", red())));
	assert_eq!(after, StyledText::styled("d", red()));
}

#[test]
fn partition_clamps_to_char_boundary() {
	let text = StyledText::plain("aé");
	let (before, after) = text.partition(2);
	assert_eq!(before.to_plain(), "a");
	assert_eq!(after.to_plain(), "é");
}

#[test]
fn split_lines_keeps_styles() {
	let text = StyledText::styled("a\nb", red()).concat(StyledText::plain("c\n"));
	let lines = text.split_lines();
	assert_eq!(
		lines,
		vec![
			StyledText::styled("a", red()),
			StyledText::styled("b", red()).concat(StyledText::plain("c")),
			StyledText::new(),
		]
	);
	assert_eq!(text.count_lines(), 3);
}

#[test]
fn empty_text_is_one_line() {
	assert_eq!(StyledText::new().count_lines(), 1);
	assert_eq!(StyledText::new().split_lines(), vec![StyledText::new()]);
}

#[test]
fn width_counts_wide_chars() {
	assert_eq!(StyledText::plain("a好").width(), 3);
}

proptest! {
	#[test]
	fn partition_preserves_text(s in "[a-zé好\n]{0,12}", at in 0usize..40) {
		let text = StyledText::plain(s.clone());
		let (before, after) = text.partition(at);
		prop_assert_eq!(format!("{before}{after}"), s);
		prop_assert!(before.len() <= at);
	}

	#[test]
	fn split_lines_matches_count(s in "[ab\n]{0,12}") {
		let text = StyledText::styled(s, red());
		prop_assert_eq!(text.split_lines().len(), text.count_lines());
	}
}
