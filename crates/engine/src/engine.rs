//! The picker state machine tying matching, storage, ingestion, filtering,
//! completion and selection merging together.

use tracing::{debug, trace};

use crate::complete;
use crate::config::EngineConfig;
use crate::error::IngestError;
use crate::filter::{self, FilterPass};
use crate::ingest::IngestionPipeline;
use crate::matcher::match_tokens;
use crate::merge;
use crate::query::Query;
use crate::store::{ItemId, ItemStore};
use crate::timer::{TimerHost, TimerToken};

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
	/// The user accepted; the payload is the query text verbatim, output
	/// separators included.
	Submitted(String),
	/// The user backed out without choosing.
	Cancelled,
	/// A single input item overflowed the accumulation buffer. Nothing was
	/// emitted.
	FatalIngestion {
		/// Configured buffer capacity, for diagnostics.
		capacity: usize,
	},
}

/// Single-session picker engine.
///
/// Owns the query, the item store and the ingestion pipeline. The host feeds
/// it input chunks, query edits, selection toggles and timer expirations, and
/// reads the query and the visible item set back out. All entry points must
/// run on one logical thread: `feed`, the edit methods and `on_timer` never
/// interleave.
pub struct PickerEngine {
	config: EngineConfig,
	query: Query,
	store: ItemStore,
	ingest: IngestionPipeline,
	complete_enabled: bool,
	last_filter: String,
	pending: Option<TimerToken>,
	user_edited: bool,
	fatal: Option<usize>,
}

impl PickerEngine {
	#[must_use]
	pub fn new(config: EngineConfig) -> Self {
		let ingest = IngestionPipeline::new(&config.input_separator, config.buffer_capacity);
		Self {
			config,
			query: Query::default(),
			store: ItemStore::new(),
			ingest,
			complete_enabled: true,
			last_filter: String::new(),
			pending: None,
			user_edited: false,
			fatal: None,
		}
	}

	/// Current query state.
	#[must_use]
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Every candidate in insertion order.
	pub fn items(&self) -> impl Iterator<Item = (ItemId, &str, bool)> {
		self.store.iter()
	}

	/// Number of currently visible candidates.
	#[must_use]
	pub fn visible_len(&self) -> usize {
		self.store.visible_len()
	}

	#[must_use]
	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	// --- ingestion ------------------------------------------------------

	/// Process one input chunk. The host gates chunk sizes by the batch
	/// budget; this does a single pass over the chunk and returns.
	///
	/// An overflow of the accumulation buffer is recorded as the session's
	/// fatal outcome in addition to being returned.
	pub fn feed(&mut self, chunk: &[u8]) -> Result<(), IngestError> {
		match self.ingest.feed(chunk) {
			Ok(items) => {
				for text in items {
					self.ingest_item(text);
				}
				Ok(())
			}
			Err(err) => {
				let IngestError::ItemTooLong { capacity } = err;
				self.fatal = Some(capacity);
				Err(err)
			}
		}
	}

	/// Signal end-of-stream, flushing a trailing unterminated item if the
	/// input had one.
	pub fn end_of_stream(&mut self) {
		if let Some(text) = self.ingest.finish() {
			self.ingest_item(text);
		}
	}

	fn ingest_item(&mut self, text: String) {
		let filter = self.filter_text();
		let visible = match_tokens(&text, &filter).is_some();
		let seed = self.store.is_empty()
			&& self.config.prefill_first_item
			&& !self.user_edited
			&& self.query.text().is_empty();
		let id = self.store.append(text, visible);
		if seed {
			// Convenience seed: pre-populate the empty query with the first
			// item, fully selected so any keystroke replaces it.
			let text = self.store.text(id).to_owned();
			self.query.reset_with_selection(text, 0);
			trace!("seeded query from first item");
			return;
		}
		if visible {
			self.try_complete();
		}
	}

	// --- query edits ----------------------------------------------------

	/// Insert text at the caret, replacing any active selection, and arm the
	/// debounced refilter. Re-enables inline completion.
	pub fn insert_text(&mut self, text: &str, timers: &mut impl TimerHost) {
		self.user_edited = true;
		if self.query.has_selection() {
			self.query.delete_selection();
		}
		self.query.insert_at_cursor(text);
		self.complete_enabled = true;
		self.schedule_refilter(timers);
	}

	/// Delete the active selection, or the char before the caret. Disables
	/// inline completion until the next insertion.
	pub fn delete_backward(&mut self, timers: &mut impl TimerHost) {
		self.user_edited = true;
		if self.query.has_selection() {
			self.query.delete_selection();
		} else if self.query.cursor() > 0 {
			let at = self.query.cursor();
			self.query.delete_range(at - 1, at);
		}
		self.complete_enabled = false;
		self.schedule_refilter(timers);
	}

	/// Delete an explicit char range. Disables inline completion until the
	/// next insertion.
	pub fn delete_range(&mut self, start: usize, end: usize, timers: &mut impl TimerHost) {
		self.user_edited = true;
		self.query.delete_range(start, end);
		self.complete_enabled = false;
		self.schedule_refilter(timers);
	}

	/// Move the caret, clearing any selection. Caret motion is not an edit
	/// and does not arm the refilter.
	pub fn move_cursor(&mut self, at: usize) {
		self.query.move_cursor(at);
	}

	/// Select a char range; the caret lands at the end.
	pub fn select(&mut self, start: usize, end: usize) {
		self.query.select(start, end);
	}

	// --- debounced refilter ---------------------------------------------

	/// Timer expiry callback: runs the filter pass and the completion
	/// attempt. Tokens superseded by a newer schedule are ignored, so a
	/// racing host timer cannot cause an extra pass.
	pub fn on_timer(&mut self, token: TimerToken) {
		if self.pending != Some(token) {
			trace!(?token, "ignoring stale debounce timer");
			return;
		}
		self.pending = None;
		self.run_filter_pass();
		self.try_complete();
	}

	fn schedule_refilter(&mut self, timers: &mut impl TimerHost) {
		if let Some(previous) = self.pending.take() {
			timers.cancel(previous);
		}
		self.pending = Some(timers.schedule_once(self.config.debounce()));
	}

	fn run_filter_pass(&mut self) {
		let filter = self.filter_text();
		let pass = filter::refilter(&mut self.store, &filter, &self.last_filter);
		if pass != FilterPass::Unchanged {
			debug!(
				filter = %filter,
				visible = self.store.visible_len(),
				?pass,
				"refiltered"
			);
		}
		self.last_filter = filter;
	}

	// --- inline completion ----------------------------------------------

	fn try_complete(&mut self) {
		if !self.complete_enabled
			|| self.query.has_selection()
			|| self.query.cursor() != self.query.len_chars()
		{
			return;
		}
		let filter = self.filter_text();
		if let Some(suffix) = complete::suggest(&self.store, &filter) {
			let start = self.query.cursor();
			self.query.insert_at_cursor(&suffix);
			self.query.select(start, self.query.len_chars());
			// FilterText excludes the selected suffix, so no refilter is due.
			trace!(suffix = %suffix, "completed inline");
		}
	}

	// --- selection merge ------------------------------------------------

	/// The host's selection set changed: rewrite the trailing in-progress
	/// segment of the query as the selected items joined by the output
	/// separator, select the merged portion, and arm the refilter.
	pub fn on_items_toggled(&mut self, selected: &[String], timers: &mut impl TimerHost) {
		self.user_edited = true;
		let (text, from) = merge::merge_selection(
			self.query.text(),
			selected,
			self.config.output_separator.as_deref(),
		);
		self.query.reset_with_selection(text, from);
		self.schedule_refilter(timers);
	}

	// --- outcome --------------------------------------------------------

	/// Accept the session, yielding the query text verbatim. A recorded
	/// fatal ingestion error takes precedence over acceptance.
	#[must_use]
	pub fn accept(self) -> SessionOutcome {
		match self.fatal {
			Some(capacity) => SessionOutcome::FatalIngestion { capacity },
			None => SessionOutcome::Submitted(self.query.into_text()),
		}
	}

	/// Abandon the session.
	#[must_use]
	pub fn cancel(self) -> SessionOutcome {
		match self.fatal {
			Some(capacity) => SessionOutcome::FatalIngestion { capacity },
			None => SessionOutcome::Cancelled,
		}
	}

	fn filter_text(&self) -> String {
		self.query.filter_text(self.config.output_separator.as_deref())
	}
}
