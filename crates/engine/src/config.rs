//! Engine configuration. Parsed and resolved by the host, consumed here.

use std::time::Duration;

use serde::Deserialize;

/// Tunables the host hands to [`PickerEngine`](crate::PickerEngine).
///
/// The batch budgets bound how much input the host should pass to a single
/// `feed` call so control keeps returning to its event loop; the engine
/// itself processes whatever it is given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Separator between items on the input stream.
	pub input_separator: String,
	/// Separator between already-chosen items in the query. `None` disables
	/// multi-select merging.
	pub output_separator: Option<String>,
	/// Quiet interval after an edit before a filter pass runs.
	pub debounce_ms: u64,
	/// Host feed budget, in items per call.
	pub batch_max_items: usize,
	/// Host feed budget, in bytes per call.
	pub batch_max_bytes: usize,
	/// Accumulation buffer capacity. A single item longer than this is a
	/// fatal ingestion error.
	pub buffer_capacity: usize,
	/// Seed the empty query with the first item's text, fully selected.
	pub prefill_first_item: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			input_separator: "\n".to_owned(),
			output_separator: None,
			debounce_ms: 200,
			batch_max_items: 20,
			batch_max_bytes: 250,
			buffer_capacity: 8192,
			prefill_first_item: true,
		}
	}
}

impl EngineConfig {
	/// Debounce delay as a [`Duration`].
	#[must_use]
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}
