//! The modifier set carried by keys and mouse presses.

use std::fmt;

use bitflags::bitflags;

bitflags! {
	/// Held modifiers. Alt and Meta are not told apart.
	#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct Modifiers: u8 {
		const CTRL  = 0b001;
		const ALT   = 0b010;
		const SHIFT = 0b100;
	}
}

/// Display order of the modifier prefixes.
const PREFIXES: [(Modifiers, &str); 3] = [
	(Modifiers::CTRL, "Ctrl-"),
	(Modifiers::ALT, "Alt-"),
	(Modifiers::SHIFT, "Shift-"),
];

/// The `Ctrl-Alt-Shift-` prefix of a key name; empty without modifiers.
impl fmt::Display for Modifiers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (flag, prefix) in PREFIXES {
			if self.contains(flag) {
				f.write_str(prefix)?;
			}
		}
		Ok(())
	}
}
