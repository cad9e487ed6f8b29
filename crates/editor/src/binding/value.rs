use std::fmt;

/// A value output by a binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<Value>),
	/// Entries in insertion order.
	Map(Vec<(Value, Value)>),
}

impl Value {
	/// Source-like representation, as printed in `[value out]` notices.
	pub fn repr(&self) -> String {
		self.to_string()
	}
}

fn is_bareword_char(c: char) -> bool {
	c.is_alphanumeric() || "-_./~:+%@!,=".contains(c)
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
	if !s.is_empty() && s.chars().all(is_bareword_char) {
		return f.write_str(s);
	}
	if s.chars().any(char::is_control) {
		f.write_str("\"")?;
		for c in s.chars() {
			match c {
				'\n' => f.write_str("\\n")?,
				'\t' => f.write_str("\\t")?,
				'"' => f.write_str("\\\"")?,
				'\\' => f.write_str("\\\\")?,
				c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
				c => write!(f, "{c}")?,
			}
		}
		return f.write_str("\"");
	}
	write!(f, "'{}'", s.replace('\'', "''"))
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nil => f.write_str("$nil"),
			Self::Bool(true) => f.write_str("$true"),
			Self::Bool(false) => f.write_str("$false"),
			Self::Int(n) => write!(f, "(num {n})"),
			Self::Float(x) => write!(f, "(num {x})"),
			Self::String(s) => write_quoted(f, s),
			Self::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(" ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Map(entries) if entries.is_empty() => f.write_str("[&]"),
			Self::Map(entries) => {
				f.write_str("[")?;
				for (i, (k, v)) in entries.iter().enumerate() {
					if i > 0 {
						f.write_str(" ")?;
					}
					write!(f, "&{k}={v}")?;
				}
				f.write_str("]")
			}
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Self::Int(n)
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Self::Float(x)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}
