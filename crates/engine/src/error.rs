//! Typed errors surfaced by the engine.

use thiserror::Error;

/// Fatal ingestion failures. Everything else in the pipeline (end-of-stream
/// with a trailing partial item, empty items between separators, a matcher
/// miss) is ordinary flow control, not an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IngestError {
	/// A single item grew past the accumulation buffer before a separator
	/// appeared. The session must terminate; no partial item is emitted.
	#[error("item exceeds the ingestion buffer capacity ({capacity} bytes)")]
	ItemTooLong {
		/// Configured buffer capacity, for diagnostics.
		capacity: usize,
	},
}
