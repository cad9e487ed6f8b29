//! Parsing of key names.
//!
//! ```text
//! key       = modifier* name
//! modifier  = ("Ctrl" | "C" | "Alt" | "A" | "Meta" | "M" | "Shift" | "S") "-"
//! name      = named-key | fn-key | char
//! named-key = "Enter" | "Tab" | "Backspace" | "Esc" | "Space" | "Up" | ...
//! fn-key    = "F" digit+
//! ```
//!
//! Modifier and key names are case-insensitive; a single character stands
//! for itself. `Ctrl-` combined with an ASCII letter is normalized to the
//! uppercase letter.

use std::str::FromStr;

use super::{Key, KeyCode, Modifiers};

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
	#[error("empty key name")]
	Empty,
	#[error("modifier `{0}` given more than once")]
	DuplicateModifier(String),
	#[error("unknown key `{0}`")]
	UnknownKey(String),
}

fn modifier(name: &str) -> Option<Modifiers> {
	match name.to_ascii_lowercase().as_str() {
		"ctrl" | "c" => Some(Modifiers::CTRL),
		"alt" | "a" | "meta" | "m" => Some(Modifiers::ALT),
		"shift" | "s" => Some(Modifiers::SHIFT),
		_ => None,
	}
}

fn named(name: &str) -> Option<KeyCode> {
	let mut chars = name.chars();
	if let (Some(c), None) = (chars.next(), chars.next()) {
		return Some(KeyCode::Char(c));
	}

	let lower = name.to_ascii_lowercase();
	let code = match lower.as_str() {
		"enter" | "ret" | "return" => KeyCode::Enter,
		"tab" => KeyCode::Tab,
		"backspace" | "bs" => KeyCode::Backspace,
		"esc" | "escape" => KeyCode::Esc,
		"space" => KeyCode::Char(' '),
		"up" => KeyCode::Up,
		"down" => KeyCode::Down,
		"left" => KeyCode::Left,
		"right" => KeyCode::Right,
		"home" => KeyCode::Home,
		"end" => KeyCode::End,
		"pageup" => KeyCode::PageUp,
		"pagedown" => KeyCode::PageDown,
		"insert" | "ins" => KeyCode::Insert,
		"delete" | "del" => KeyCode::Delete,
		_ => {
			let digits = lower.strip_prefix('f')?;
			if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
				return None;
			}
			KeyCode::F(digits.parse().ok()?)
		}
	};
	Some(code)
}

impl FromStr for Key {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Err(KeyParseError::Empty);
		}

		let mut modifiers = Modifiers::empty();
		let mut rest = s;
		// A trailing "-" after a modifier is the minus key itself ("Ctrl--").
		while let Some((prefix, tail)) = rest.split_once('-')
			&& !tail.is_empty()
			&& let Some(m) = modifier(prefix)
		{
			if modifiers.contains(m) {
				return Err(KeyParseError::DuplicateModifier(prefix.to_string()));
			}
			modifiers.insert(m);
			rest = tail;
		}

		let code = named(rest).ok_or_else(|| KeyParseError::UnknownKey(s.to_string()))?;
		Ok(Key::with_modifiers(code, modifiers).normalize())
	}
}
