//! Append-only, insertion-ordered candidate collection.

/// Stable handle to an item. Doubles as the insertion ordinal: items are
/// never removed or reordered, so the ordinal never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
	pub(crate) fn from_ordinal(ordinal: usize) -> Self {
		Self(ordinal)
	}

	/// Insertion position of the item.
	#[must_use]
	pub fn ordinal(self) -> usize {
		self.0
	}
}

#[derive(Debug)]
struct Item {
	text: String,
	visible: bool,
}

/// Ordered collection of candidates with a visibility flag per item.
///
/// Owns no matching logic; visibility is written by the ingestion and filter
/// passes. Out-of-range ids are contract violations and panic.
#[derive(Debug, Default)]
pub struct ItemStore {
	items: Vec<Item>,
}

impl ItemStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Append a candidate with its initial visibility.
	pub fn append(&mut self, text: String, visible: bool) -> ItemId {
		let id = ItemId(self.items.len());
		self.items.push(Item { text, visible });
		id
	}

	#[must_use]
	pub fn text(&self, id: ItemId) -> &str {
		&self.items[id.0].text
	}

	#[must_use]
	pub fn is_visible(&self, id: ItemId) -> bool {
		self.items[id.0].visible
	}

	/// Set an item's visibility. Returns whether the flag actually changed.
	pub fn set_visible(&mut self, id: ItemId, visible: bool) -> bool {
		let item = &mut self.items[id.0];
		if item.visible == visible {
			false
		} else {
			item.visible = visible;
			true
		}
	}

	/// Iterate every item in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str, bool)> {
		self.items
			.iter()
			.enumerate()
			.map(|(ordinal, item)| (ItemId(ordinal), item.text.as_str(), item.visible))
	}

	#[must_use]
	pub fn visible_len(&self) -> usize {
		self.items.iter().filter(|item| item.visible).count()
	}
}
