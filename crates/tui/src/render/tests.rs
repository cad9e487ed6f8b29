use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::buffer::{Cell, Pos};

#[test]
fn mode_line_puts_dot_after_filter() {
	let buf = ModeLineRenderer::new("LISTING", "ab").render(20);
	assert_eq!(buf.plain_lines(), vec![" LISTING  ab"]);
	assert_eq!(buf.dot, Pos::new(0, 12));
	assert_eq!(buf.lines[0][0], Cell::new(" ", MODE_TITLE_STYLE));
	assert_eq!(buf.lines[0][11], Cell::new("b", FILTER_STYLE));
}

#[test]
fn lines_renderer_one_line_per_entry() {
	let buf = LinesRenderer(vec!["note 1".into(), "note 2".into()]).render(10);
	assert_eq!(buf.plain_lines(), vec!["note 1", "note 2"]);
}

#[test]
fn styled_lines_are_clipped_not_wrapped() {
	let lines = vec![StyledText::plain("item 0 with a long tail"), StyledText::plain("item 1")];
	let buf = StyledLinesRenderer(lines).render(8);
	assert_eq!(buf.plain_lines(), vec!["item 0 w", "item 1"]);
}

#[rstest]
#[case::top(10, 0, 3, 3, (0, 1))]
#[case::middle(10, 1, 7, 6, (1, 5))]
#[case::bottom(10, 7, 10, 3, (2, 3))]
#[case::everything(3, 0, 3, 3, (0, 3))]
#[case::tiny_window_at_end(100, 99, 100, 4, (3, 4))]
fn thumb(#[case] n: usize, #[case] low: usize, #[case] high: usize, #[case] height: usize, #[case] want: (usize, usize)) {
	assert_eq!(thumb_interval(n, low, high, height), want);
}

#[test]
fn scrollbar_occupies_last_column() {
	let base = LinesRenderer(vec!["aaaa".into(), "b".into(), "c".into()]);
	let buf = VerticalScrollbar::new(Box::new(base), 10, 0, 3).render(5);
	assert_eq!(buf.plain_lines(), vec!["aaaa ", "b   │", "c   │"]);
	assert_eq!(buf.lines[0][4], Cell::new(" ", SCROLLBAR_THUMB_STYLE));
	assert_eq!(buf.lines[1][4], Cell::new("│", SCROLLBAR_TROUGH_STYLE));
}
