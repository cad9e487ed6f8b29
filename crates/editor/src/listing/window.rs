use super::Items;

/// Lines kept between the selected item and the window edges, unless the
/// height is too small or the selection is near either end of the list.
pub const RESPECT_DISTANCE: usize = 2;

/// Picks the window of a listing: the first item to show and how many of its
/// leading lines to crop.
///
/// The window keeps [`RESPECT_DISTANCE`] lines on both sides of the selection
/// when `max_height` allows, otherwise splits what is left evenly. Budget a
/// short tail cannot use is moved upwards. Expanding upwards stops early at
/// `old_first` once the respect distance is met and the whole budget can be
/// consumed, so the window does not jump while the selection moves inside it.
///
/// `selected` must be a valid index.
pub fn find_window(items: &dyn Items, old_first: usize, selected: usize, max_height: usize) -> (usize, usize) {
	let n = items.len();
	let height = |i: usize| items.show(i).count_lines();
	let selected_height = height(selected);

	if max_height <= selected_height {
		return (selected, 0);
	}

	let budget = max_height - selected_height;
	let mut budget_up = if budget >= 2 * RESPECT_DISTANCE {
		budget - RESPECT_DISTANCE
	} else {
		budget / 2
	};
	let budget_down = budget - budget_up;

	let mut use_down = 0;
	for i in selected + 1..n {
		use_down += height(i);
		if use_down >= budget {
			break;
		}
	}
	if budget_down > use_down {
		budget_up += budget_down - use_down;
	}

	let mut use_up = 0;
	for i in (0..selected).rev() {
		use_up += height(i);
		if use_up >= budget_up {
			return (i, use_up - budget_up);
		}
		if i <= old_first && use_up >= RESPECT_DISTANCE && use_up + use_down >= budget {
			return (i, 0);
		}
	}
	(0, 0)
}
