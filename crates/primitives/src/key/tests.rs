use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[rstest]
#[case::ctrl_letter(Key::ctrl('A'), "Ctrl-A")]
#[case::plain_char(Key::char('x'), "x")]
#[case::space(Key::char(' '), "Space")]
#[case::alt_enter(Key::new(KeyCode::Enter).with_alt(), "Alt-Enter")]
#[case::shift_tab(Key::new(KeyCode::Tab).with_shift(), "Shift-Tab")]
#[case::function(Key::new(KeyCode::F(5)), "F5")]
#[case::all_modifiers(
	Key::with_modifiers(KeyCode::Up, Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT),
	"Ctrl-Alt-Shift-Up"
)]
fn display(#[case] key: Key, #[case] expected: &str) {
	assert_eq!(key.to_string(), expected);
}

#[rstest]
#[case::long_prefix("Ctrl-A", Key::ctrl('A'))]
#[case::short_prefix("C-a", Key::ctrl('A'))]
#[case::meta("M-x", Key::alt('x'))]
#[case::named_lowercase("enter", Key::new(KeyCode::Enter))]
#[case::shift_tab("S-Tab", Key::new(KeyCode::Tab).with_shift())]
#[case::minus_key("Ctrl--", Key::ctrl('-'))]
#[case::bare_minus("-", Key::char('-'))]
#[case::fn_key("F12", Key::new(KeyCode::F(12)))]
#[case::unicode("é", Key::char('é'))]
fn parse(#[case] input: &str, #[case] expected: Key) {
	assert_eq!(input.parse::<Key>(), Ok(expected));
}

#[rstest]
#[case::empty("", KeyParseError::Empty)]
#[case::duplicate("Ctrl-C-a", KeyParseError::DuplicateModifier("C".into()))]
#[case::unknown("Hyper-a", KeyParseError::UnknownKey("Hyper-a".into()))]
#[case::bad_fn("Fx", KeyParseError::UnknownKey("Fx".into()))]
fn parse_errors(#[case] input: &str, #[case] expected: KeyParseError) {
	assert_eq!(input.parse::<Key>(), Err(expected));
}

#[test]
fn display_parses_back() {
	for key in [
		Key::ctrl('A'),
		Key::alt(','),
		Key::new(KeyCode::Backspace),
		Key::new(KeyCode::PageDown).with_shift(),
		Key::char(' '),
	] {
		assert_eq!(key.to_string().parse::<Key>(), Ok(key));
	}
}

#[test]
fn escape_forms() {
	assert!(Key::new(KeyCode::Esc).is_escape());
	assert!(Key::ctrl('[').is_escape());
	assert!(!Key::new(KeyCode::Esc).with_alt().is_escape());
}

#[test]
fn printable_requires_no_modifiers() {
	assert!(Key::char('a').is_printable());
	assert!(Key::char(' ').is_printable());
	assert!(!Key::ctrl('A').is_printable());
	assert!(!Key::char('\u{7}').is_printable());
	assert!(!Key::new(KeyCode::Enter).is_printable());
}

#[rstest]
#[case::letter('a', true)]
#[case::wide('好', true)]
#[case::combining_mark('\u{301}', true)]
#[case::no_break_space('\u{a0}', true)]
#[case::zero_width_space('\u{200b}', false)]
#[case::left_to_right_mark('\u{200e}', false)]
#[case::soft_hyphen('\u{ad}', false)]
#[case::byte_order_mark('\u{feff}', false)]
#[case::line_separator('\u{2028}', false)]
#[case::private_use('\u{e000}', false)]
#[case::delete('\u{7f}', false)]
fn printable_needs_a_graphic_char(#[case] c: char, #[case] printable: bool) {
	assert_eq!(Key::char(c).is_printable(), printable);
}

#[test]
fn modifier_prefixes_in_fixed_order() {
	assert_eq!((Modifiers::SHIFT | Modifiers::CTRL).to_string(), "Ctrl-Shift-");
	assert_eq!(Modifiers::empty().to_string(), "");
}
