//! Mouse events reported by the terminal.

use super::Modifiers;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
	Left,
	Right,
	Middle,
}

/// Scroll direction for wheel events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
	Up,
	Down,
	Left,
	Right,
}

/// A mouse event at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEvent {
	Press {
		button: MouseButton,
		row: u16,
		col: u16,
		modifiers: Modifiers,
	},
	Release {
		row: u16,
		col: u16,
	},
	Drag {
		button: MouseButton,
		row: u16,
		col: u16,
		modifiers: Modifiers,
	},
	Scroll {
		direction: ScrollDirection,
		row: u16,
		col: u16,
		modifiers: Modifiers,
	},
	Move {
		row: u16,
		col: u16,
	},
}

impl MouseEvent {
	/// Cell position as `(row, col)`.
	pub fn position(&self) -> (u16, u16) {
		match *self {
			Self::Press { row, col, .. }
			| Self::Release { row, col }
			| Self::Drag { row, col, .. }
			| Self::Scroll { row, col, .. }
			| Self::Move { row, col } => (row, col),
		}
	}
}
