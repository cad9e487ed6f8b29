//! Picks the last command or one of its words.

use std::sync::Arc;

use shline_primitives::StyledText;

use super::start_listing;
use crate::binding::BindingError;
use crate::listing::{Items, ListingMode, StartConfig};
use crate::state::State;

pub const NAME: &str = "LASTCMD";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
	/// Empty for the whole command.
	index: String,
	text: String,
}

#[derive(Debug, Clone, Default)]
struct Entries(Vec<Entry>);

impl Items for Entries {
	fn len(&self) -> usize {
		self.0.len()
	}

	fn show(&self, i: usize) -> StyledText {
		self.0
			.get(i)
			.map(|e| StyledText::plain(format!("{:>3} {}", e.index, e.text)))
			.unwrap_or_default()
	}

	fn accept(&self, i: usize, state: &State) -> Result<(), BindingError> {
		if let Some(entry) = self.0.get(i) {
			state.insert_at_dot(&entry.text);
		}
		Ok(())
	}
}

fn entries(cmd: &str) -> Vec<Entry> {
	let whole = Entry {
		index: String::new(),
		text: cmd.to_string(),
	};
	let words = cmd.split_whitespace().enumerate().map(|(i, word)| Entry {
		index: i.to_string(),
		text: word.to_string(),
	});
	std::iter::once(whole).chain(words).collect()
}

/// Listing of `cmd` and its words, filtered by index prefix. Typing an index
/// that matches a single entry inserts it right away.
pub fn config(cmd: &str) -> StartConfig {
	let all = entries(cmd);
	StartConfig {
		name: NAME.into(),
		items_getter: Some(Arc::new(move |filter: &str| {
			let matching = all.iter().filter(|e| e.index.starts_with(filter)).cloned().collect();
			Arc::new(Entries(matching)) as Arc<dyn Items>
		})),
		start_filter: true,
		auto_accept: true,
		..Default::default()
	}
}

pub fn start(state: &State, cmd: &str) -> Arc<ListingMode> {
	start_listing(state, config(cmd))
}
