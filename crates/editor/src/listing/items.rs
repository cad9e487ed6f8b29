use shline_primitives::StyledText;

use crate::binding::BindingError;
use crate::state::State;

/// The entries shown by a listing.
pub trait Items: Send + Sync {
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Display text of entry `i`; may span several lines.
	fn show(&self, i: usize) -> StyledText;

	/// Acts on entry `i` being chosen.
	fn accept(&self, _i: usize, _state: &State) -> Result<(), BindingError> {
		Ok(())
	}
}

/// Fixed entries that do nothing when accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceItems(Vec<StyledText>);

impl SliceItems {
	pub fn new(texts: Vec<StyledText>) -> Self {
		Self(texts)
	}
}

impl<T: Into<StyledText>> FromIterator<T> for SliceItems {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl Items for SliceItems {
	fn len(&self) -> usize {
		self.0.len()
	}

	fn show(&self, i: usize) -> StyledText {
		self.0.get(i).cloned().unwrap_or_default()
	}
}
