use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::mode::BasicMode;

#[test]
fn insert_at_dot_advances_dot() {
	let st = State::new();
	st.set_code_and_dot("ac", 1);
	st.insert_at_dot("bb");
	assert_eq!(st.code_and_dot(), ("abbc".to_string(), 3));
	assert_eq!(st.code_before_dot(), "abb");
	assert_eq!(st.code_after_dot(), "c");
}

#[test]
fn insert_never_splits_a_char() {
	let st = State::new();
	st.mutate(|raw| {
		raw.code = "é".into();
		raw.dot = 1;
	});
	st.insert_at_dot("x");
	assert_eq!(st.code_and_dot(), ("xé".to_string(), 1));
}

#[test]
fn set_code_clamps_dot() {
	let st = State::new();
	st.set_code_and_dot("abc", 10);
	assert_eq!(st.code_and_dot(), ("abc".to_string(), 3));
}

#[test]
fn pop_for_redraw_clears_notes_once() {
	let st = State::new();
	st.add_notice("hello");
	st.add_notice("world");

	let first = st.pop_for_redraw();
	assert_eq!(first.notes, vec!["hello", "world"]);
	let second = st.pop_for_redraw();
	assert!(second.notes.is_empty());
}

#[test]
fn finalize_moves_dot_and_keeps_notes() {
	let st = State::new();
	st.set_code_and_dot("some code", 1);
	st.set_pending(Some(PendingCode {
		begin: 0,
		end: 4,
		text: "other".into(),
	}));
	st.add_notice("note");
	st.set_mode(Some(Arc::new(BasicMode)));

	let fin = st.finalize();
	assert_eq!(fin.code, "some code");
	assert_eq!(fin.dot, 9);
	assert_eq!(fin.pending, None);
	assert_eq!(fin.notes, vec!["note"]);
	let mode = fin.mode.unwrap();
	assert!(mode.mode_line().is_none());

	// The live state is untouched.
	assert_eq!(st.code_and_dot(), ("some code".to_string(), 1));
	assert!(st.pending().is_some());
}

#[test]
fn reset_empties_everything() {
	let st = State::new();
	st.set_code_and_dot("abc", 2);
	st.add_notice("n");
	st.set_binding_key(shline_primitives::Key::char('a'));
	st.set_mode(Some(Arc::new(BasicMode)));
	st.reset();

	let raw = st.snapshot();
	assert_eq!(raw.code, "");
	assert_eq!(raw.dot, 0);
	assert!(raw.notes.is_empty());
	assert!(raw.mode.is_none());
	assert!(raw.binding_key.is_none());
}

#[test]
fn display_code_applies_pending() {
	let raw = RawState {
		code: "echo foo".into(),
		dot: 8,
		pending: Some(PendingCode {
			begin: 5,
			end: 8,
			text: "foobar".into(),
		}),
		..RawState::default()
	};
	assert_eq!(raw.display_code(), ("echo foobar".to_string(), 11));
}
