use std::fmt;
use std::sync::Arc;

use super::{Items, ItemsGetter, SliceItems};

/// Filter, selection and scroll position of a listing.
#[derive(Clone)]
pub struct ListingState {
	items: Arc<dyn Items>,
	getter: Option<ItemsGetter>,
	select_last: bool,
	pub filter: String,
	pub filtering: bool,
	pub selected: usize,
	/// First item shown in the panel.
	pub first: usize,
}

impl Default for ListingState {
	fn default() -> Self {
		Self {
			items: Arc::new(SliceItems::default()),
			getter: None,
			select_last: false,
			filter: String::new(),
			filtering: false,
			selected: 0,
			first: 0,
		}
	}
}

impl fmt::Debug for ListingState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListingState")
			.field("items", &self.items.len())
			.field("filter", &self.filter)
			.field("filtering", &self.filtering)
			.field("selected", &self.selected)
			.field("first", &self.first)
			.finish()
	}
}

impl ListingState {
	pub(super) fn new(getter: Option<ItemsGetter>, filtering: bool, select_last: bool) -> Self {
		let mut state = Self {
			getter,
			filtering,
			select_last,
			..Self::default()
		};
		state.refilter(String::new());
		state
	}

	pub fn items(&self) -> &Arc<dyn Items> {
		&self.items
	}

	/// Replaces the filter, fetches the matching items and resets the
	/// selection and scroll position.
	pub fn refilter(&mut self, filter: impl Into<String>) {
		self.filter = filter.into();
		if let Some(getter) = &self.getter {
			self.items = getter(&self.filter);
		}
		self.first = 0;
		self.selected = if self.select_last {
			self.items.len().saturating_sub(1)
		} else {
			0
		};
	}

	pub fn up(&mut self) {
		self.selected = self.selected.saturating_sub(1);
	}

	pub fn down(&mut self) {
		if self.selected + 1 < self.items.len() {
			self.selected += 1;
		}
	}

	pub fn up_cycle(&mut self) {
		let n = self.items.len();
		if n == 0 {
			return;
		}
		self.selected = if self.selected == 0 { n - 1 } else { self.selected - 1 };
	}

	pub fn down_cycle(&mut self) {
		let n = self.items.len();
		if n == 0 {
			return;
		}
		self.selected = (self.selected + 1) % n;
	}

	pub fn toggle_filtering(&mut self) {
		self.filtering = !self.filtering;
	}

	/// Removes the last char of the filter.
	pub(super) fn pop_filter(&mut self) {
		let mut filter = self.filter.clone();
		if filter.pop().is_some() {
			self.refilter(filter);
		}
	}
}
