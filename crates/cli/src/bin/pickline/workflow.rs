//! Headless session driver: drain an input stream through the engine within
//! the batch budget, settle the debounce between batches, and collect the
//! outcome.

use std::io::Read;

use anyhow::{Context, Result};
use tracing::debug;

use pickline_engine::{EngineConfig, ManualTimers, PickerEngine, SessionOutcome};

/// One headless picker run.
pub(crate) struct PickSession {
	engine: PickerEngine,
	timers: ManualTimers,
}

/// Everything the output formatters need once the session is over.
#[derive(Debug)]
pub(crate) struct SessionReport {
	pub(crate) outcome: SessionOutcome,
	pub(crate) matches: Vec<String>,
}

impl PickSession {
	pub(crate) fn new(config: EngineConfig, initial_query: Option<&str>) -> Self {
		let mut engine = PickerEngine::new(config);
		let mut timers = ManualTimers::new();
		if let Some(query) = initial_query {
			engine.insert_text(query, &mut timers);
		}
		Self { engine, timers }
	}

	/// Feed `input` to the engine in budgeted batches, then accept.
	///
	/// Reads are capped at `batch_max_bytes` and each read is further split
	/// so no single feed call carries more than `batch_max_items`
	/// separators. There is no interactive event loop here, so the debounce
	/// window is taken to have elapsed whenever a batch boundary is reached:
	/// pending timers fire between batches and once more after
	/// end-of-stream.
	pub(crate) fn run(mut self, input: &mut dyn Read) -> Result<SessionReport> {
		let budget = self.engine.config().batch_max_bytes;
		let max_items = self.engine.config().batch_max_items;
		let separator = self.engine.config().input_separator.clone().into_bytes();
		let mut chunk = vec![0u8; budget];
		'stream: loop {
			let read = input
				.read(&mut chunk)
				.context("failed to read input stream")?;
			if read == 0 {
				self.engine.end_of_stream();
				break;
			}
			for batch in split_batches(&chunk[..read], &separator, max_items) {
				if self.engine.feed(batch).is_err() {
					// Fatal; the outcome carries the diagnostics.
					break 'stream;
				}
				self.fire_due_timers();
			}
		}
		self.fire_due_timers();

		let matches: Vec<String> = self
			.engine
			.items()
			.filter(|(_, _, visible)| *visible)
			.map(|(_, text, _)| text.to_owned())
			.collect();
		debug!(total = self.engine.items().count(), visible = matches.len(), "session finished");

		Ok(SessionReport {
			outcome: self.engine.accept(),
			matches,
		})
	}

	fn fire_due_timers(&mut self) {
		if let Some(token) = self.timers.take_pending() {
			self.engine.on_timer(token);
		}
	}
}

/// Cut `chunk` after every `max_items`-th separator so each piece stays
/// within the per-call item budget.
fn split_batches<'chunk>(
	chunk: &'chunk [u8],
	separator: &[u8],
	max_items: usize,
) -> Vec<&'chunk [u8]> {
	let mut batches = Vec::new();
	let mut start = 0;
	let mut seen = 0;
	let mut at = 0;
	while at + separator.len() <= chunk.len() {
		if &chunk[at..at + separator.len()] == separator {
			at += separator.len();
			seen += 1;
			if seen == max_items {
				batches.push(&chunk[start..at]);
				start = at;
				seen = 0;
			}
		} else {
			at += 1;
		}
	}
	if start < chunk.len() {
		batches.push(&chunk[start..]);
	}
	batches
}

pub(crate) fn print_plain(report: &SessionReport, list_matches: bool) {
	if list_matches {
		for text in &report.matches {
			println!("{text}");
		}
		return;
	}
	if let SessionOutcome::Submitted(text) = &report.outcome {
		println!("{text}");
	}
}

pub(crate) fn print_json(report: &SessionReport) -> Result<()> {
	let outcome = match &report.outcome {
		SessionOutcome::Submitted(_) => "submitted",
		SessionOutcome::Cancelled => "cancelled",
		SessionOutcome::FatalIngestion { .. } => "fatal-ingestion-error",
	};
	let query = match &report.outcome {
		SessionOutcome::Submitted(text) => Some(text.as_str()),
		_ => None,
	};
	let payload = serde_json::json!({
		"outcome": outcome,
		"query": query,
		"matches": report.matches,
	});
	println!("{}", serde_json::to_string_pretty(&payload)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn a_query_narrows_and_completes_the_stream() {
		let session = PickSession::new(
			EngineConfig {
				prefill_first_item: false,
				..EngineConfig::default()
			},
			Some("bet"),
		);
		let mut input: &[u8] = b"alpha\nbeta\ngamma\n";
		let report = session.run(&mut input).unwrap();
		assert_eq!(report.matches, vec!["beta".to_owned()]);
		assert_eq!(report.outcome, SessionOutcome::Submitted("beta".to_owned()));
	}

	#[test]
	fn overflow_surfaces_as_the_fatal_outcome() {
		let session = PickSession::new(
			EngineConfig {
				buffer_capacity: 8,
				prefill_first_item: false,
				..EngineConfig::default()
			},
			None,
		);
		let mut input: &[u8] = b"far longer than eight bytes with no separator";
		let report = session.run(&mut input).unwrap();
		assert_eq!(
			report.outcome,
			SessionOutcome::FatalIngestion { capacity: 8 }
		);
		assert!(report.matches.is_empty());
	}

	#[test]
	fn batches_are_cut_after_the_item_budget() {
		assert_eq!(
			split_batches(b"a\nb\nc\nd", b"\n", 2),
			vec![b"a\nb\n".as_slice(), b"c\nd".as_slice()]
		);
		assert_eq!(split_batches(b"a\nb\n", b"\n", 2), vec![b"a\nb\n".as_slice()]);
		assert_eq!(split_batches(b"abc", b"\n", 1), vec![b"abc".as_slice()]);
	}

	#[test]
	fn an_item_budget_of_one_still_drains_the_whole_stream() {
		let session = PickSession::new(
			EngineConfig {
				batch_max_items: 1,
				prefill_first_item: false,
				..EngineConfig::default()
			},
			Some("b"),
		);
		let mut input: &[u8] = b"alpha\nbeta\ngamma\n";
		let report = session.run(&mut input).unwrap();
		assert_eq!(report.matches, vec!["beta".to_owned()]);
	}

	#[test]
	fn prefill_submits_the_first_item_untouched() {
		let session = PickSession::new(EngineConfig::default(), None);
		let mut input: &[u8] = b"one\ntwo\n";
		let report = session.run(&mut input).unwrap();
		assert_eq!(report.outcome, SessionOutcome::Submitted("one".to_owned()));
	}
}
