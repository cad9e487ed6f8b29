//! Text styles and their SGR encoding.
//!
//! A [`Style`] is an optional foreground, optional background and a set of
//! [`Modifier`]s. [`Style::sgr`] renders it as the parameter list of an SGR
//! escape sequence (`"1;31"` for bold red), which is also how frames are
//! compared in tests.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;


bitflags! {
	/// Text attributes that compose with each other.
	#[derive(Default, Clone, Copy, Eq, PartialEq, Hash)]
	pub struct Modifier: u16 {
		const BOLD       = 0b0000_0001;
		const DIM        = 0b0000_0010;
		const ITALIC     = 0b0000_0100;
		const UNDERLINED = 0b0000_1000;
		const BLINK      = 0b0001_0000;
		const REVERSED   = 0b0010_0000;
	}
}

impl fmt::Debug for Modifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return write!(f, "NONE");
		}
		write!(f, "{}", self.0)
	}
}

const MODIFIER_SGR: [(Modifier, u8); 6] = [
	(Modifier::BOLD, 1),
	(Modifier::DIM, 2),
	(Modifier::ITALIC, 3),
	(Modifier::UNDERLINED, 4),
	(Modifier::BLINK, 5),
	(Modifier::REVERSED, 7),
];

/// Terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
	Black,
	Red,
	Green,
	Yellow,
	Blue,
	Magenta,
	Cyan,
	White,
	BrightBlack,
	BrightRed,
	BrightGreen,
	BrightYellow,
	BrightBlue,
	BrightMagenta,
	BrightCyan,
	BrightWhite,
	/// 256-color palette index.
	Indexed(u8),
	Rgb(u8, u8, u8),
}

const NAMED: [(&str, Color); 16] = [
	("black", Color::Black),
	("red", Color::Red),
	("green", Color::Green),
	("yellow", Color::Yellow),
	("blue", Color::Blue),
	("magenta", Color::Magenta),
	("cyan", Color::Cyan),
	("white", Color::White),
	("bright-black", Color::BrightBlack),
	("bright-red", Color::BrightRed),
	("bright-green", Color::BrightGreen),
	("bright-yellow", Color::BrightYellow),
	("bright-blue", Color::BrightBlue),
	("bright-magenta", Color::BrightMagenta),
	("bright-cyan", Color::BrightCyan),
	("bright-white", Color::BrightWhite),
];

impl Color {
	/// SGR parameters selecting this color; `background` shifts into the
	/// 40/100 ranges.
	fn sgr(self, background: bool) -> String {
		let base: u8 = if background { 10 } else { 0 };
		let ansi = |n: u8| (n + base).to_string();
		match self {
			Self::Black => ansi(30),
			Self::Red => ansi(31),
			Self::Green => ansi(32),
			Self::Yellow => ansi(33),
			Self::Blue => ansi(34),
			Self::Magenta => ansi(35),
			Self::Cyan => ansi(36),
			Self::White => ansi(37),
			Self::BrightBlack => ansi(90),
			Self::BrightRed => ansi(91),
			Self::BrightGreen => ansi(92),
			Self::BrightYellow => ansi(93),
			Self::BrightBlue => ansi(94),
			Self::BrightMagenta => ansi(95),
			Self::BrightCyan => ansi(96),
			Self::BrightWhite => ansi(97),
			Self::Indexed(i) => format!("{};5;{i}", 38 + base),
			Self::Rgb(r, g, b) => format!("{};2;{r};{g};{b}", 38 + base),
		}
	}
}

/// Error from [`Style::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style token `{0}`")]
pub struct StyleParseError(pub String);

/// Foreground, background and modifiers of a run of text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
	pub fg: Option<Color>,
	pub bg: Option<Color>,
	pub modifiers: Modifier,
}

impl Style {
	/// The empty style.
	pub const fn new() -> Self {
		Self {
			fg: None,
			bg: None,
			modifiers: Modifier::empty(),
		}
	}

	pub const fn fg(mut self, color: Color) -> Self {
		self.fg = Some(color);
		self
	}

	pub const fn bg(mut self, color: Color) -> Self {
		self.bg = Some(color);
		self
	}

	pub const fn add_modifier(mut self, modifier: Modifier) -> Self {
		self.modifiers = self.modifiers.union(modifier);
		self
	}

	/// Layers `other` on top: its colors win where set, modifiers accumulate.
	pub fn patch(self, other: Style) -> Self {
		Self {
			fg: other.fg.or(self.fg),
			bg: other.bg.or(self.bg),
			modifiers: self.modifiers | other.modifiers,
		}
	}

	pub fn is_plain(&self) -> bool {
		*self == Self::new()
	}

	/// SGR parameter list, empty for the plain style.
	pub fn sgr(&self) -> String {
		let mut parts: Vec<String> = MODIFIER_SGR
			.iter()
			.filter(|(m, _)| self.modifiers.contains(*m))
			.map(|(_, code)| code.to_string())
			.collect();
		if let Some(fg) = self.fg {
			parts.push(fg.sgr(false));
		}
		if let Some(bg) = self.bg {
			parts.push(bg.sgr(true));
		}
		parts.join(";")
	}
}

impl From<Modifier> for Style {
	fn from(modifier: Modifier) -> Self {
		Self::new().add_modifier(modifier)
	}
}

/// Parses space-separated tokens such as `"bold red bg-blue"`. Color names
/// use the `bright-` prefix; `inverse` is an alias of `reversed`.
impl FromStr for Style {
	type Err = StyleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let color = |name: &str| NAMED.iter().find(|(n, _)| *n == name).map(|(_, c)| *c);
		s.split_whitespace().try_fold(Style::new(), |style, token| {
			let modifier = match token {
				"bold" => Some(Modifier::BOLD),
				"dim" => Some(Modifier::DIM),
				"italic" => Some(Modifier::ITALIC),
				"underlined" => Some(Modifier::UNDERLINED),
				"blink" => Some(Modifier::BLINK),
				"inverse" | "reversed" => Some(Modifier::REVERSED),
				_ => None,
			};
			if let Some(m) = modifier {
				return Ok(style.add_modifier(m));
			}
			if let Some(name) = token.strip_prefix("bg-")
				&& let Some(c) = color(name)
			{
				return Ok(style.bg(c));
			}
			color(token).map(|c| style.fg(c)).ok_or_else(|| StyleParseError(token.to_string()))
		})
	}
}
