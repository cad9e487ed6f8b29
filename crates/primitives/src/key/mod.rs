//! Key representation used by bindings and terminal input.
//!
//! A [`Key`] is a [`KeyCode`] plus a [`Modifiers`] set. Keys print in the
//! `Ctrl-Alt-Shift-<name>` form (`Ctrl-A`, `Alt-Enter`, `Shift-Tab`) and parse
//! back from the same form, plus the short `C-`/`A-`/`M-`/`S-` prefixes.

use std::fmt;

#[cfg(feature = "crossterm")]
mod convert;
mod modifiers;
mod mouse;
mod parse;
#[cfg(test)]
mod tests;

pub use modifiers::Modifiers;
pub use mouse::{MouseButton, MouseEvent, ScrollDirection};
pub use parse::KeyParseError;

/// The unmodified part of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A character; space is `Char(' ')`.
	Char(char),
	Enter,
	Tab,
	Backspace,
	Esc,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PageUp,
	PageDown,
	Insert,
	Delete,
	/// Function key `F1`..`F12` (or beyond, if the terminal reports it).
	F(u8),
}

impl KeyCode {
	/// Canonical name of a non-character key.
	pub fn name(self) -> Option<&'static str> {
		Some(match self {
			Self::Char(' ') => "Space",
			Self::Char(_) | Self::F(_) => return None,
			Self::Enter => "Enter",
			Self::Tab => "Tab",
			Self::Backspace => "Backspace",
			Self::Esc => "Esc",
			Self::Up => "Up",
			Self::Down => "Down",
			Self::Left => "Left",
			Self::Right => "Right",
			Self::Home => "Home",
			Self::End => "End",
			Self::PageUp => "PageUp",
			Self::PageDown => "PageDown",
			Self::Insert => "Insert",
			Self::Delete => "Delete",
		})
	}
}

impl fmt::Display for KeyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Char(c) if *c != ' ' => write!(f, "{c}"),
			Self::F(n) => write!(f, "F{n}"),
			other => f.write_str(other.name().unwrap_or("?")),
		}
	}
}

/// A key with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Create a key from a character with no modifiers.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Create a key from a key code with no modifiers.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::empty(),
		}
	}

	/// Create a key from a code and modifier set.
	pub const fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// Create a character key with Ctrl held.
	pub const fn ctrl(c: char) -> Self {
		Self::with_modifiers(KeyCode::Char(c), Modifiers::CTRL)
	}

	/// Create a character key with Alt held.
	pub const fn alt(c: char) -> Self {
		Self::with_modifiers(KeyCode::Char(c), Modifiers::ALT)
	}

	/// Add Shift modifier.
	pub const fn with_shift(self) -> Self {
		Self {
			modifiers: self.modifiers.union(Modifiers::SHIFT),
			..self
		}
	}

	/// Add Alt modifier.
	pub const fn with_alt(self) -> Self {
		Self {
			modifiers: self.modifiers.union(Modifiers::ALT),
			..self
		}
	}

	/// Get the character if this is a character key.
	pub fn codepoint(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) => Some(c),
			_ => None,
		}
	}

	/// Whether the key inserts its character when typed: no modifiers and a
	/// graphic codepoint (letters, marks, numbers, punctuation, symbols and
	/// spaces).
	pub fn is_printable(&self) -> bool {
		self.modifiers.is_empty() && matches!(self.code, KeyCode::Char(c) if is_graphic(c))
	}

	/// Check if this key is escape (`Esc` or its control form `Ctrl-[`).
	pub fn is_escape(&self) -> bool {
		(matches!(self.code, KeyCode::Esc) && self.modifiers.is_empty()) || *self == Self::ctrl('[')
	}

	/// Check if this key is backspace.
	pub fn is_backspace(&self) -> bool {
		matches!(self.code, KeyCode::Backspace) && self.modifiers.is_empty()
	}

	/// Check if this key is enter.
	pub fn is_enter(&self) -> bool {
		matches!(self.code, KeyCode::Enter) && self.modifiers.is_empty()
	}

	/// Canonical form: Ctrl with an ASCII letter always carries the
	/// uppercase letter, so `Ctrl-a` and `Ctrl-A` bind the same key.
	pub fn normalize(self) -> Self {
		if self.modifiers.contains(Modifiers::CTRL)
			&& let KeyCode::Char(c) = self.code
			&& c.is_ascii_lowercase()
		{
			return Self {
				code: KeyCode::Char(c.to_ascii_uppercase()),
				..self
			};
		}
		self
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code)
	}
}

impl From<char> for Key {
	fn from(c: char) -> Self {
		Self::char(c)
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.modifiers, self.code)
	}
}

/// Format characters (`Cf`), line and paragraph separators and private use.
const NON_GRAPHIC: &[(char, char)] = &[
	('\u{ad}', '\u{ad}'),
	('\u{600}', '\u{605}'),
	('\u{61c}', '\u{61c}'),
	('\u{6dd}', '\u{6dd}'),
	('\u{70f}', '\u{70f}'),
	('\u{890}', '\u{891}'),
	('\u{8e2}', '\u{8e2}'),
	('\u{180e}', '\u{180e}'),
	('\u{200b}', '\u{200f}'),
	('\u{2028}', '\u{202e}'),
	('\u{2060}', '\u{2064}'),
	('\u{2066}', '\u{206f}'),
	('\u{e000}', '\u{f8ff}'),
	('\u{feff}', '\u{feff}'),
	('\u{fff9}', '\u{fffb}'),
	('\u{110bd}', '\u{110bd}'),
	('\u{110cd}', '\u{110cd}'),
	('\u{13430}', '\u{1343f}'),
	('\u{1bca0}', '\u{1bca3}'),
	('\u{1d173}', '\u{1d17a}'),
	('\u{e0001}', '\u{e0001}'),
	('\u{e0020}', '\u{e007f}'),
	('\u{f0000}', '\u{10ffff}'),
];

fn is_graphic(c: char) -> bool {
	!c.is_control()
		&& NON_GRAPHIC
			.binary_search_by(|&(low, high)| {
				if high < c {
					std::cmp::Ordering::Less
				} else if low > c {
					std::cmp::Ordering::Greater
				} else {
					std::cmp::Ordering::Equal
				}
			})
			.is_err()
}
