//! Bounded streaming ingestion: raw byte chunks in, separator-delimited
//! items out.
//!
//! The pipeline never reads anything itself. The host hands it whatever
//! bytes are ready, sized to the batch budget, and each call does a single
//! scan of the accumulation buffer before returning control.

use tracing::trace;

use crate::error::IngestError;

/// Accumulates input chunks and splits them into items on a configurable
/// separator.
#[derive(Debug)]
pub struct IngestionPipeline {
	buf: Vec<u8>,
	separator: Vec<u8>,
	capacity: usize,
	open: bool,
}

impl IngestionPipeline {
	/// Build a pipeline splitting on `separator`, with `capacity` bounding
	/// how long a single unterminated item may grow.
	#[must_use]
	pub fn new(separator: &str, capacity: usize) -> Self {
		assert!(!separator.is_empty(), "input separator must not be empty");
		assert!(capacity > 0, "ingestion buffer capacity must be non-zero");
		Self {
			buf: Vec::new(),
			separator: separator.as_bytes().to_vec(),
			capacity,
			open: true,
		}
	}

	/// Append a chunk and drain every item it completes.
	///
	/// Empty items (a separator directly following another) are silently
	/// skipped. If any single item exceeds the buffer capacity — whether its
	/// separator has arrived or not — the pipeline closes and the whole
	/// batch is discarded; the session is terminating anyway and no partial
	/// item may be emitted.
	pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, IngestError> {
		assert!(self.open, "feed on a closed pipeline");
		self.buf.extend_from_slice(chunk);

		let mut items = Vec::new();
		while let Some(at) = find_separator(&self.buf, &self.separator) {
			if at > self.capacity {
				return Err(self.overflow());
			}
			let rest = self.buf.split_off(at + self.separator.len());
			let mut raw = std::mem::replace(&mut self.buf, rest);
			raw.truncate(at);
			if !raw.is_empty() {
				items.push(decode(raw));
			}
		}

		if self.buf.len() > self.capacity {
			return Err(self.overflow());
		}

		trace!(items = items.len(), buffered = self.buf.len(), "fed chunk");
		Ok(items)
	}

	/// Signal end-of-stream, flushing the trailing partial item if there is
	/// one. This is the expected way for a stream without a final separator
	/// to deliver its last item.
	pub fn finish(&mut self) -> Option<String> {
		assert!(self.open, "finish on a closed pipeline");
		self.open = false;
		let raw = std::mem::take(&mut self.buf);
		if raw.is_empty() { None } else { Some(decode(raw)) }
	}

	fn overflow(&mut self) -> IngestError {
		self.open = false;
		IngestError::ItemTooLong {
			capacity: self.capacity,
		}
	}
}

fn decode(raw: Vec<u8>) -> String {
	match String::from_utf8(raw) {
		Ok(text) => text,
		Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
	}
}

fn find_separator(buf: &[u8], separator: &[u8]) -> Option<usize> {
	if buf.len() < separator.len() {
		return None;
	}
	buf.windows(separator.len()).position(|window| window == separator)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_the_separator_and_keeps_the_partial_tail() {
		let mut pipeline = IngestionPipeline::new("\n", 64);
		let items = pipeline.feed(b"a\nb\nc").unwrap();
		assert_eq!(items, vec!["a".to_owned(), "b".to_owned()]);
		assert_eq!(pipeline.finish(), Some("c".to_owned()));
	}

	#[test]
	fn separator_split_across_chunks() {
		let mut pipeline = IngestionPipeline::new("::", 64);
		assert_eq!(pipeline.feed(b"one:").unwrap(), Vec::<String>::new());
		assert_eq!(pipeline.feed(b":two").unwrap(), vec!["one".to_owned()]);
	}

	#[test]
	fn empty_items_are_skipped() {
		let mut pipeline = IngestionPipeline::new("\n", 64);
		let items = pipeline.feed(b"a\n\n\nb\n").unwrap();
		assert_eq!(items, vec!["a".to_owned(), "b".to_owned()]);
		assert_eq!(pipeline.finish(), None);
	}

	#[test]
	fn overflow_is_fatal_and_closes_the_pipeline() {
		let mut pipeline = IngestionPipeline::new("\n", 4);
		let err = pipeline.feed(b"toolong").unwrap_err();
		assert_eq!(err, IngestError::ItemTooLong { capacity: 4 });
	}

	#[test]
	#[should_panic(expected = "closed pipeline")]
	fn feeding_after_overflow_is_a_contract_violation() {
		let mut pipeline = IngestionPipeline::new("\n", 4);
		let _ = pipeline.feed(b"toolong");
		let _ = pipeline.feed(b"more");
	}

	#[test]
	fn oversized_item_is_fatal_even_when_its_separator_arrives_with_it() {
		let mut pipeline = IngestionPipeline::new("\n", 4);
		let err = pipeline.feed(b"abcde\n").unwrap_err();
		assert_eq!(err, IngestError::ItemTooLong { capacity: 4 });
	}

	#[test]
	fn oversized_item_discards_the_batch_it_arrived_in() {
		let mut pipeline = IngestionPipeline::new("\n", 4);
		let err = pipeline.feed(b"ok\ntoolong\nmore\n").unwrap_err();
		assert_eq!(err, IngestError::ItemTooLong { capacity: 4 });
	}

	#[test]
	fn item_exactly_at_capacity_survives() {
		let mut pipeline = IngestionPipeline::new("\n", 4);
		let items = pipeline.feed(b"abcd\n").unwrap();
		assert_eq!(items, vec!["abcd".to_owned()]);
	}

	#[test]
	fn invalid_utf8_is_replaced_not_fatal() {
		let mut pipeline = IngestionPipeline::new("\n", 64);
		let items = pipeline.feed(b"a\xffb\n").unwrap();
		assert_eq!(items.len(), 1);
		assert!(items[0].contains('\u{fffd}'));
	}
}
