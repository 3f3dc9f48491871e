//! Query text with caret and selection, and the FilterText derivation.

/// The text the user is editing, with cursor and selection bounds measured in
/// chars.
///
/// `sel_start == sel_end` means no selection, caret only. Every mutation
/// asserts the invariants: indices never exceed the text length and the
/// selection is well-ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	text: String,
	cursor: usize,
	sel_start: usize,
	sel_end: usize,
}

impl Query {
	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Caret position in chars.
	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Active selection bounds, if any.
	#[must_use]
	pub fn selection(&self) -> Option<(usize, usize)> {
		(self.sel_start != self.sel_end).then_some((self.sel_start, self.sel_end))
	}

	#[must_use]
	pub fn has_selection(&self) -> bool {
		self.sel_start != self.sel_end
	}

	/// Text length in chars.
	#[must_use]
	pub fn len_chars(&self) -> usize {
		self.text.chars().count()
	}

	/// The portion of the query that drives item visibility: everything
	/// before the selection (or the caret when nothing is selected), with
	/// anything up through the last output separator stripped off, so only
	/// the in-progress, not-yet-submitted segment is considered.
	#[must_use]
	pub fn filter_text(&self, output_separator: Option<&str>) -> String {
		let upto = if self.has_selection() {
			self.sel_start
		} else {
			self.cursor
		};
		let prefix = &self.text[..self.byte_at(upto)];
		match output_separator {
			Some(sep) if !sep.is_empty() => match prefix.rfind(sep) {
				Some(at) => prefix[at + sep.len()..].to_owned(),
				None => prefix.to_owned(),
			},
			_ => prefix.to_owned(),
		}
	}

	pub(crate) fn insert_at_cursor(&mut self, text: &str) {
		debug_assert!(!self.has_selection(), "insert with an active selection");
		let at = self.byte_at(self.cursor);
		self.text.insert_str(at, text);
		self.cursor += text.chars().count();
		self.sel_start = self.cursor;
		self.sel_end = self.cursor;
	}

	pub(crate) fn delete_selection(&mut self) {
		let (start, end) = (self.sel_start, self.sel_end);
		self.sel_end = self.sel_start;
		self.delete_range(start, end);
	}

	pub(crate) fn delete_range(&mut self, start: usize, end: usize) {
		assert!(start <= end, "delete range is reversed");
		assert!(end <= self.len_chars(), "delete range out of range");
		let from = self.byte_at(start);
		let to = self.byte_at(end);
		self.text.replace_range(from..to, "");
		self.cursor = clamp_removed(self.cursor, start, end);
		self.sel_start = clamp_removed(self.sel_start, start, end);
		self.sel_end = clamp_removed(self.sel_end, start, end);
	}

	pub(crate) fn move_cursor(&mut self, at: usize) {
		assert!(at <= self.len_chars(), "cursor out of range");
		self.cursor = at;
		self.sel_start = at;
		self.sel_end = at;
	}

	/// Select `start..end`, landing the caret at the end.
	pub(crate) fn select(&mut self, start: usize, end: usize) {
		assert!(start <= end, "selection is reversed");
		assert!(end <= self.len_chars(), "selection out of range");
		self.sel_start = start;
		self.sel_end = end;
		self.cursor = end;
	}

	/// Replace the whole text, selecting everything from `select_from` to the
	/// end so the next insertion naturally overwrites it.
	pub(crate) fn reset_with_selection(&mut self, text: String, select_from: usize) {
		self.text = text;
		let len = self.len_chars();
		assert!(select_from <= len, "selection start out of range");
		self.sel_start = select_from;
		self.sel_end = len;
		self.cursor = len;
	}

	pub(crate) fn into_text(self) -> String {
		self.text
	}

	fn byte_at(&self, char_idx: usize) -> usize {
		self.text
			.char_indices()
			.nth(char_idx)
			.map_or(self.text.len(), |(at, _)| at)
	}
}

fn clamp_removed(index: usize, start: usize, end: usize) -> usize {
	if index <= start {
		index
	} else if index >= end {
		index - (end - start)
	} else {
		start
	}
}
