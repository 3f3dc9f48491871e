//! Multi-select merge: rewrite the query tail with the selected items.

/// Replace the in-progress trailing segment of `current` with the selected
/// items joined by `separator`.
///
/// The trailing segment starts after the last occurrence of the separator,
/// or at offset 0 when the separator is absent or unconfigured. Returns the
/// rewritten text together with the char offset where the replacement begins,
/// so the caller can select exactly the merged portion.
///
/// Without a separator the merge degenerates to plain concatenation from
/// offset 0; multi-select is not meaningful there and the host is expected
/// to toggle at most one item.
#[must_use]
pub fn merge_selection(
	current: &str,
	selected: &[String],
	separator: Option<&str>,
) -> (String, usize) {
	let keep = match separator {
		Some(sep) if !sep.is_empty() => current.rfind(sep).map_or(0, |at| at + sep.len()),
		_ => 0,
	};
	let kept = &current[..keep];
	let joined = match separator {
		Some(sep) => selected.join(sep),
		None => selected.concat(),
	};

	let mut text = String::with_capacity(kept.len() + joined.len());
	text.push_str(kept);
	text.push_str(&joined);
	(text, kept.chars().count())
}
