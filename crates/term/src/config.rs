//! The config file: editor settings plus user key bindings.
//!
//! ```toml
//! max-height = 10
//!
//! [bindings]
//! "Ctrl-H" = "backspace"
//! "Ctrl-J" = "commit-code"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use shline_editor::binding::builtins;
use shline_editor::{BindingTable, Config};
use shline_keymap::BindingMap;

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
	#[serde(flatten)]
	pub editor: Config,
	/// Key spec to builtin binding name.
	#[serde(default)]
	pub bindings: BindingMap<String>,
}

impl FileConfig {
	pub fn parse(text: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Reads `path`, or the default location when `None`. A missing default
	/// file yields the defaults; a missing explicit file is an error.
	pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let (path, explicit) = match path {
			Some(path) => (path.to_path_buf(), true),
			None => match default_path() {
				Some(path) => (path, false),
				None => return Ok(Self::default()),
			},
		};
		match std::fs::read_to_string(&path) {
			Ok(text) => Self::parse(&text).with_context(|| format!("in {}", path.display())),
			Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "config.default_missing");
				Ok(Self::default())
			}
			Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
		}
	}

	/// Resolves binding names into a table.
	pub fn binding_table(&self) -> anyhow::Result<BindingTable> {
		self.bindings.clone().try_map(|spec, name| {
			builtins::by_name(&name).with_context(|| format!("unknown binding `{name}` for {spec}"))
		})
	}
}

fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("shline").join("config.toml"))
}
