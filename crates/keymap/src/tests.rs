use pretty_assertions::assert_eq;
use shline_primitives::KeyCode;

use super::*;

fn map(entries: &[(&str, &'static str)]) -> BindingMap<&'static str> {
	let mut m = BindingMap::new();
	for (spec, h) in entries {
		m.bind_spec(spec, *h).unwrap();
	}
	m
}

#[test]
fn exact_key_in_later_layer_beats_earlier_default() {
	let mode = map(&[("Default", "mode-default"), ("Up", "mode-up")]);
	let global = map(&[("Ctrl-A", "global-ctrl-a")]);

	let found = lookup_layered(&Key::ctrl('A'), &[&mode, &global]).unwrap();
	assert_eq!(*found.handler, "global-ctrl-a");
	assert_eq!(found.layer, 1);
	assert_eq!(found.matched, Matched::Key);
}

#[test]
fn defaults_tried_in_layer_order() {
	let a = map(&[("x", "a-x")]);
	let b = map(&[("Default", "b-default")]);
	let c = map(&[("Default", "c-default")]);

	let found = lookup_layered(&Key::char('y'), &[&a, &b, &c]).unwrap();
	assert_eq!(*found.handler, "b-default");
	assert_eq!(found.matched, Matched::Default);
}

#[test]
fn nothing_found() {
	let a = map(&[("x", "a-x")]);
	assert!(lookup_layered(&Key::char('y'), &[&a]).is_none());
	assert!(lookup_layered::<&str>(&Key::char('y'), &[]).is_none());
}

#[test]
fn ctrl_letters_are_case_insensitive() {
	let m = map(&[("Ctrl-a", "h")]);
	assert_eq!(m.get(&Key::ctrl('A')), Some(&"h"));
	assert_eq!(m.get(&Key::ctrl('a')), Some(&"h"));
}

#[test]
fn rebinding_replaces() {
	let mut m = map(&[("Enter", "old")]);
	assert_eq!(m.bind(Key::new(KeyCode::Enter), "new"), Some("old"));
	assert_eq!(m.len(), 1);
	assert_eq!(m.unbind(&Key::new(KeyCode::Enter)), Some("new"));
	assert!(m.is_empty());
}

#[test]
fn deserialize_from_toml() {
	let m: BindingMap<String> = toml::from_str(
		r#"
		"Ctrl-L" = "location"
		"Alt-," = "lastcmd"
		Default = "self-insert"
		"#,
	)
	.unwrap();
	assert_eq!(m.get(&Key::ctrl('L')).map(String::as_str), Some("location"));
	assert_eq!(m.get(&Key::alt(',')).map(String::as_str), Some("lastcmd"));
	assert_eq!(m.default_handler().map(String::as_str), Some("self-insert"));
	let order: Vec<String> = m.iter().map(|(k, _)| k.to_string()).collect();
	assert_eq!(order, vec!["Ctrl-L", "Alt-,"]);
}

#[test]
fn deserialize_rejects_bad_key() {
	let err = toml::from_str::<BindingMap<String>>(r#""Hyper-x" = "nope""#).unwrap_err();
	assert!(err.to_string().contains("unknown key `Hyper-x`"), "{err}");
}

#[test]
fn try_map_sees_specs() {
	let m = map(&[("Tab", "t"), ("Default", "d")]);
	let seen = m
		.try_map(|spec, h| Ok::<_, ()>(format!("{spec}={h}")))
		.unwrap();
	assert_eq!(seen.get(&Key::new(KeyCode::Tab)).map(String::as_str), Some("Tab=t"));
	assert_eq!(seen.default_handler().map(String::as_str), Some("Default=d"));
}
