//! Picks a directory from a scored list.

use std::sync::Arc;

use shline_primitives::StyledText;

use super::start_listing;
use crate::binding::BindingError;
use crate::listing::{Items, ListingMode, StartConfig};
use crate::state::State;

pub const NAME: &str = "LOCATION";

/// A directory and how often it was visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Dir {
	pub path: String,
	pub score: f64,
}

impl Dir {
	pub fn new(path: impl Into<String>, score: f64) -> Self {
		Self {
			path: path.into(),
			score,
		}
	}
}

/// Called with the path of the accepted directory.
pub type OnAccept = Arc<dyn Fn(&str) -> Result<(), BindingError> + Send + Sync>;

struct Dirs {
	dirs: Vec<Dir>,
	on_accept: OnAccept,
}

impl Items for Dirs {
	fn len(&self) -> usize {
		self.dirs.len()
	}

	fn show(&self, i: usize) -> StyledText {
		self.dirs
			.get(i)
			.map(|d| StyledText::plain(format!("{:>3.0} {}", d.score, d.path)))
			.unwrap_or_default()
	}

	fn accept(&self, i: usize, _state: &State) -> Result<(), BindingError> {
		match self.dirs.get(i) {
			Some(dir) => (self.on_accept)(&dir.path),
			None => Ok(()),
		}
	}
}

/// Listing of `dirs` filtered by case-insensitive substring.
pub fn config(dirs: Vec<Dir>, on_accept: OnAccept) -> StartConfig {
	StartConfig {
		name: NAME.into(),
		items_getter: Some(Arc::new(move |filter: &str| {
			let needle = filter.to_lowercase();
			let matching = dirs
				.iter()
				.filter(|d| d.path.to_lowercase().contains(&needle))
				.cloned()
				.collect();
			Arc::new(Dirs {
				dirs: matching,
				on_accept: Arc::clone(&on_accept),
			}) as Arc<dyn Items>
		})),
		start_filter: true,
		..Default::default()
	}
}

pub fn start(state: &State, dirs: Vec<Dir>, on_accept: OnAccept) -> Arc<ListingMode> {
	start_listing(state, config(dirs, on_accept))
}
