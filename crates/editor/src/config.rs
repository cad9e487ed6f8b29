//! Editor configuration.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid config: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Settings read on every redraw.
///
/// ```toml
/// max-height = 12
/// rprompt-persistent = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
	/// Lines the editor may use; the terminal height when unset or larger.
	pub max_height: Option<usize>,
	/// Keep the right prompt in the final frame of a session.
	pub rprompt_persistent: bool,
}

impl Config {
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Height available for a frame on a terminal with `rows` rows.
	pub fn effective_height(&self, rows: usize) -> usize {
		self.max_height.map_or(rows, |h| h.min(rows))
	}
}
