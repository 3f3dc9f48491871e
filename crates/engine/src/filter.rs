//! Visibility recomputation with the narrowing optimization.

use tracing::debug;

use crate::matcher::match_tokens;
use crate::store::{ItemId, ItemStore};

/// How a filter pass walked the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterPass {
	/// Filter text unchanged since the last completed pass; nothing scanned.
	Unchanged,
	/// The new filter extends the previous one; only the currently visible
	/// items were retested.
	Narrowed,
	/// Every item was retested.
	Full,
}

/// Recompute item visibility for `filter`, given the filter text of the last
/// completed pass.
///
/// When the old text is a prefix of the new one, narrowing cannot reveal a
/// hidden item, so only the visible ones are rescanned. Any other change,
/// including an equal-length replacement, rescans everything.
pub fn refilter(store: &mut ItemStore, filter: &str, last: &str) -> FilterPass {
	if filter == last {
		return FilterPass::Unchanged;
	}
	let narrowing = filter.starts_with(last);
	let mut changed = 0usize;
	for ordinal in 0..store.len() {
		let id = ItemId::from_ordinal(ordinal);
		if narrowing && !store.is_visible(id) {
			continue;
		}
		let visible = match_tokens(store.text(id), filter).is_some();
		if store.set_visible(id, visible) {
			changed += 1;
		}
	}
	debug!(filter, changed, narrowing, "filter pass");
	if narrowing {
		FilterPass::Narrowed
	} else {
		FilterPass::Full
	}
}
