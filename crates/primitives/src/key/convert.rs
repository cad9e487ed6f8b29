//! Conversions from crossterm input events.

use crossterm::event::{
	KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtButton, MouseEvent as CtMouseEvent,
	MouseEventKind,
};

use super::{Key, KeyCode, Modifiers, MouseButton, MouseEvent, ScrollDirection};

impl From<KeyModifiers> for Modifiers {
	fn from(m: KeyModifiers) -> Self {
		let mut modifiers = Self::empty();
		modifiers.set(Self::CTRL, m.contains(KeyModifiers::CONTROL));
		modifiers.set(Self::ALT, m.intersects(KeyModifiers::ALT | KeyModifiers::META));
		modifiers.set(Self::SHIFT, m.contains(KeyModifiers::SHIFT));
		modifiers
	}
}

impl Key {
	/// Converts a crossterm key event. Releases and keys with no line-editing
	/// meaning (media keys, lone modifiers, caps lock) yield `None`.
	pub fn from_crossterm(event: &KeyEvent) -> Option<Self> {
		if event.kind == KeyEventKind::Release {
			return None;
		}
		let mut modifiers = Modifiers::from(event.modifiers);
		let code = match event.code {
			CtKeyCode::Char(c) => {
				// Shift is already folded into the reported character.
				if !c.is_ascii_alphabetic() || !modifiers.contains(Modifiers::CTRL) {
					modifiers.remove(Modifiers::SHIFT);
				}
				KeyCode::Char(c)
			}
			CtKeyCode::Enter => KeyCode::Enter,
			CtKeyCode::Tab => KeyCode::Tab,
			CtKeyCode::BackTab => {
				modifiers.insert(Modifiers::SHIFT);
				KeyCode::Tab
			}
			CtKeyCode::Backspace => KeyCode::Backspace,
			CtKeyCode::Esc => KeyCode::Esc,
			CtKeyCode::Up => KeyCode::Up,
			CtKeyCode::Down => KeyCode::Down,
			CtKeyCode::Left => KeyCode::Left,
			CtKeyCode::Right => KeyCode::Right,
			CtKeyCode::Home => KeyCode::Home,
			CtKeyCode::End => KeyCode::End,
			CtKeyCode::PageUp => KeyCode::PageUp,
			CtKeyCode::PageDown => KeyCode::PageDown,
			CtKeyCode::Insert => KeyCode::Insert,
			CtKeyCode::Delete => KeyCode::Delete,
			CtKeyCode::F(n) => KeyCode::F(n),
			_ => return None,
		};
		Some(Key::with_modifiers(code, modifiers).normalize())
	}
}

fn button(b: CtButton) -> MouseButton {
	match b {
		CtButton::Left => MouseButton::Left,
		CtButton::Right => MouseButton::Right,
		CtButton::Middle => MouseButton::Middle,
	}
}

impl From<CtMouseEvent> for MouseEvent {
	fn from(event: CtMouseEvent) -> Self {
		let (row, col) = (event.row, event.column);
		let modifiers = Modifiers::from(event.modifiers);
		match event.kind {
			MouseEventKind::Down(b) => Self::Press {
				button: button(b),
				row,
				col,
				modifiers,
			},
			MouseEventKind::Up(_) => Self::Release { row, col },
			MouseEventKind::Drag(b) => Self::Drag {
				button: button(b),
				row,
				col,
				modifiers,
			},
			MouseEventKind::ScrollUp => Self::Scroll {
				direction: ScrollDirection::Up,
				row,
				col,
				modifiers,
			},
			MouseEventKind::ScrollDown => Self::Scroll {
				direction: ScrollDirection::Down,
				row,
				col,
				modifiers,
			},
			MouseEventKind::ScrollLeft => Self::Scroll {
				direction: ScrollDirection::Left,
				row,
				col,
				modifiers,
			},
			MouseEventKind::ScrollRight => Self::Scroll {
				direction: ScrollDirection::Right,
				row,
				col,
				modifiers,
			},
			MouseEventKind::Moved => Self::Move { row, col },
		}
	}
}
