//! Key binding tables.
//!
//! A [`BindingMap`] maps keys to handlers and may carry a default handler for
//! keys it does not name. Several maps are consulted as layers by
//! [`lookup_layered`]: every layer is searched for the exact key first, and
//! only when no layer binds it are the layers' defaults tried, in the same
//! order.
//!
//! Keys are written in the [`Key`] text form, with the special name
//! `Default` selecting the default handler:
//!
//! ```toml
//! "Ctrl-L" = "location"
//! "Alt-," = "lastcmd"
//! Default = "self-insert"
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use shline_primitives::{Key, KeyParseError};

#[cfg(test)]
mod tests;

/// Name of the default-handler slot in textual binding specs.
pub const DEFAULT_NAME: &str = "Default";

/// Target of a binding spec: a concrete key or the default slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySpec {
	Key(Key),
	Default,
}

impl FromStr for KeySpec {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == DEFAULT_NAME {
			return Ok(Self::Default);
		}
		s.parse().map(Self::Key)
	}
}

impl fmt::Display for KeySpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Key(key) => write!(f, "{key}"),
			Self::Default => f.write_str(DEFAULT_NAME),
		}
	}
}

/// Keys bound to handlers, plus an optional default handler.
///
/// Iteration order is insertion order.
#[derive(Debug, Clone)]
pub struct BindingMap<H> {
	keys: IndexMap<Key, H>,
	default: Option<H>,
}

impl<H> Default for BindingMap<H> {
	fn default() -> Self {
		Self {
			keys: IndexMap::new(),
			default: None,
		}
	}
}

impl<H> BindingMap<H> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `key`, returning the handler it replaces.
	pub fn bind(&mut self, key: Key, handler: H) -> Option<H> {
		self.keys.insert(key.normalize(), handler)
	}

	pub fn bind_default(&mut self, handler: H) -> Option<H> {
		self.default.replace(handler)
	}

	/// Binds the target named by `spec` (`"Ctrl-A"`, `"Default"`, ...).
	pub fn bind_spec(&mut self, spec: &str, handler: H) -> Result<Option<H>, KeyParseError> {
		Ok(match spec.parse()? {
			KeySpec::Key(key) => self.bind(key, handler),
			KeySpec::Default => self.bind_default(handler),
		})
	}

	pub fn unbind(&mut self, key: &Key) -> Option<H> {
		self.keys.shift_remove(&key.normalize())
	}

	/// Handler bound to exactly `key`.
	pub fn get(&self, key: &Key) -> Option<&H> {
		self.keys.get(&key.normalize())
	}

	pub fn default_handler(&self) -> Option<&H> {
		self.default.as_ref()
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty() && self.default.is_none()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Key, &H)> {
		self.keys.iter()
	}

	/// Converts every handler, keeping keys and order.
	pub fn map<T>(self, mut f: impl FnMut(H) -> T) -> BindingMap<T> {
		BindingMap {
			keys: self.keys.into_iter().map(|(k, h)| (k, f(h))).collect(),
			default: self.default.map(f),
		}
	}

	/// Converts every handler, stopping at the first failure.
	pub fn try_map<T, E>(self, mut f: impl FnMut(KeySpec, H) -> Result<T, E>) -> Result<BindingMap<T>, E> {
		let mut out = BindingMap::new();
		for (key, handler) in self.keys {
			out.keys.insert(key, f(KeySpec::Key(key), handler)?);
		}
		if let Some(handler) = self.default {
			out.default = Some(f(KeySpec::Default, handler)?);
		}
		Ok(out)
	}
}

impl<H> FromIterator<(Key, H)> for BindingMap<H> {
	fn from_iter<I: IntoIterator<Item = (Key, H)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (key, handler) in iter {
			map.bind(key, handler);
		}
		map
	}
}

/// Which pass of a layered lookup found the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched {
	Key,
	Default,
}

/// Result of [`lookup_layered`].
#[derive(Debug)]
pub struct Lookup<'a, H> {
	pub handler: &'a H,
	/// Index of the layer the handler came from.
	pub layer: usize,
	pub matched: Matched,
}

/// Finds the handler for `key` across `layers`: exact bindings in every
/// layer win over any layer's default.
pub fn lookup_layered<'a, H>(key: &Key, layers: &[&'a BindingMap<H>]) -> Option<Lookup<'a, H>> {
	let exact = layers.iter().enumerate().find_map(|(layer, map)| {
		map.get(key).map(|handler| Lookup {
			handler,
			layer,
			matched: Matched::Key,
		})
	});
	exact.or_else(|| {
		layers.iter().enumerate().find_map(|(layer, map)| {
			map.default_handler().map(|handler| Lookup {
				handler,
				layer,
				matched: Matched::Default,
			})
		})
	})
}

impl<'de, H: Deserialize<'de>> Deserialize<'de> for BindingMap<H> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct MapVisitor<H>(std::marker::PhantomData<H>);

		impl<'de, H: Deserialize<'de>> Visitor<'de> for MapVisitor<H> {
			type Value = BindingMap<H>;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a table from key names to bindings")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
				let mut map = BindingMap::new();
				while let Some((spec, handler)) = access.next_entry::<String, H>()? {
					map.bind_spec(&spec, handler)
						.map_err(|e| serde::de::Error::custom(format!("{spec}: {e}")))?;
				}
				Ok(map)
			}
		}

		deserializer.deserialize_map(MapVisitor(std::marker::PhantomData))
	}
}
