use std::io::Write;
use std::sync::Arc;

use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use rstest::rstest;
use shline_primitives::{Key, KeyCode};

use super::*;

fn table(entries: Vec<(Key, Arc<dyn Binding>)>) -> SharedBindings {
	Arc::new(RwLock::new(entries.into_iter().collect()))
}

fn inserting(text: &'static str) -> Arc<dyn Binding> {
	binding(move |ctx| {
		ctx.state().insert_at_dot(text);
		Ok(())
	})
}

#[test]
fn unbound_key_adds_notice() {
	let st = State::new();
	let dispatcher = Dispatcher::new(vec![table(vec![])]);

	let action = dispatcher.dispatch(Key::ctrl('A'), &st);

	assert_eq!(action, HandlerAction::NoAction);
	assert_eq!(st.notes(), vec!["Unbound: Ctrl-A"]);
	assert_eq!(st.binding_key(), None);
}

#[test]
fn exact_binding_in_later_layer_beats_default_in_earlier_layer() {
	let st = State::new();
	let mut first = BindingTable::new();
	first.bind_default(inserting("default"));
	let dispatcher = Dispatcher::new(vec![
		Arc::new(RwLock::new(first)),
		table(vec![(Key::char('a'), inserting("exact"))]),
	]);

	dispatcher.dispatch(Key::char('a'), &st);
	assert_eq!(st.code(), "exact");

	dispatcher.dispatch(Key::char('b'), &st);
	assert_eq!(st.code(), "exactdefault");
}

#[test]
fn binding_key_is_recorded() {
	let st = State::new();
	let dispatcher = Dispatcher::new(vec![table(vec![(Key::char('x'), builtins::insert_key())])]);

	dispatcher.dispatch(Key::char('x'), &st);

	assert_eq!(st.binding_key(), Some(Key::char('x')));
	assert_eq!(st.code(), "x");
}

#[test]
fn commit_code_builtin_returns_action() {
	let st = State::new();
	let dispatcher = Dispatcher::new(vec![table(vec![(Key::from(KeyCode::Enter), builtins::commit_code())])]);

	assert_eq!(dispatcher.dispatch(Key::from(KeyCode::Enter), &st), HandlerAction::CommitCode);
	assert!(st.notes().is_empty());
}

#[test]
fn failure_becomes_binding_error_notice() {
	let st = State::new();
	let failing = binding(|_| Err(BindingError::failed("oops")));

	let action = call_binding(failing.as_ref(), Key::char('a'), &st);

	assert_eq!(action, HandlerAction::NoAction);
	assert_eq!(st.notes(), vec!["[binding error] oops"]);
}

#[test]
fn arity_mismatch_is_reported() {
	let st = State::new();
	let two_args = FnBinding::with_arity(2, |_, _| Ok(()));

	call_binding(&two_args, Key::char('a'), &st);

	assert_eq!(
		st.notes(),
		vec!["[binding error] arity mismatch: want 2 arguments, got 0"]
	);
}

#[test]
fn values_and_bytes_become_notices() {
	let st = State::new();
	let chatty = binding(|ctx| {
		ctx.put("value");
		ctx.put(Value::List(vec![Value::from("a b"), Value::Int(2)]));
		write!(ctx.out(), "line one\npartial")?;
		Ok(())
	});

	call_binding(chatty.as_ref(), Key::char('a'), &st);

	assert_eq!(
		st.notes(),
		vec![
			"[value out] value",
			"[value out] ['a b' (num 2)]",
			"[bytes out] line one",
			"[bytes out] partial",
		]
	);
}

#[test]
fn binding_may_rebind_its_own_table() {
	let st = State::new();
	let shared = table(vec![]);
	let inner = Arc::clone(&shared);
	shared.write().bind(
		Key::char('r'),
		binding(move |_| {
			inner.write().bind(Key::char('s'), builtins::insert_key());
			Ok(())
		}),
	);
	let dispatcher = Dispatcher::new(vec![shared]);

	dispatcher.dispatch(Key::char('r'), &st);
	dispatcher.dispatch(Key::char('s'), &st);

	assert_eq!(st.code(), "s");
}

#[rstest]
#[case::nil(Value::Nil, "$nil")]
#[case::boolean(Value::Bool(true), "$true")]
#[case::int(Value::Int(42), "(num 42)")]
#[case::bareword(Value::from("foo-bar/baz"), "foo-bar/baz")]
#[case::spaces(Value::from("it's here"), "'it''s here'")]
#[case::empty(Value::from(""), "''")]
#[case::control(Value::from("a\nb"), "\"a\\nb\"")]
#[case::empty_map(Value::Map(vec![]), "[&]")]
#[case::map(Value::Map(vec![(Value::from("k"), Value::from("v"))]), "[&k=v]")]
fn value_repr(#[case] value: Value, #[case] expected: &str) {
	assert_eq!(value.repr(), expected);
}

#[rstest]
#[case::backspace(builtins::backspace(), "ac", 1)]
#[case::left(builtins::move_dot_left(), "abc", 1)]
#[case::right(builtins::move_dot_right(), "abc", 3)]
fn editing_builtins(#[case] b: Arc<dyn Binding>, #[case] code: &str, #[case] dot: usize) {
	let st = State::new();
	st.set_code_and_dot("abc", 2);

	call_binding(b.as_ref(), Key::char('a'), &st);

	assert_eq!(st.code_and_dot(), (code.to_string(), dot));
}

#[test]
fn builtins_resolve_by_name() {
	assert!(builtins::by_name("self-insert").is_some());
	assert!(builtins::by_name("no-such-thing").is_none());
}
