//! Inline completion: choose the suffix to suggest, if any.

use crate::matcher::eq_ignore_case;
use crate::store::ItemStore;

/// Find the completion suffix for `filter`: the first visible item, in store
/// order, whose text has `filter` as a strict case-insensitive prefix. No
/// scoring or ranking; store order decides.
///
/// An empty filter never completes — it is a prefix of everything and would
/// suggest the first item before the user typed at all.
#[must_use]
pub fn suggest(store: &ItemStore, filter: &str) -> Option<String> {
	if filter.is_empty() {
		return None;
	}
	store
		.iter()
		.filter(|(_, _, visible)| *visible)
		.find_map(|(_, text, _)| strip_prefix_ci(text, filter).map(str::to_owned))
}

/// The tail of `text` after a case-insensitive `prefix`, if `text` is
/// strictly longer than the prefix.
fn strip_prefix_ci<'text>(text: &'text str, prefix: &str) -> Option<&'text str> {
	let mut chars = text.char_indices();
	for want in prefix.chars() {
		let (_, have) = chars.next()?;
		if !eq_ignore_case(have, want) {
			return None;
		}
	}
	let rest = chars.as_str();
	if rest.is_empty() { None } else { Some(rest) }
}
