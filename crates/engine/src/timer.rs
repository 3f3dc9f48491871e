//! Host timer seam for the debounced refilter.

use std::time::Duration;

/// Opaque handle to a scheduled one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
	#[must_use]
	pub fn new(raw: u64) -> Self {
		Self(raw)
	}

	#[must_use]
	pub fn raw(self) -> u64 {
		self.0
	}
}

/// One-shot timer facility supplied by the host event loop.
///
/// The engine always cancels the previous token before scheduling a new one,
/// so implementations never hold more than one live timer per engine. Firing
/// a cancelled or superseded token anyway is harmless; the engine ignores
/// stale tokens.
pub trait TimerHost {
	/// Arrange for the engine's timer callback to run with the returned
	/// token once `delay` has elapsed.
	fn schedule_once(&mut self, delay: Duration) -> TimerToken;

	/// Drop a previously scheduled timer.
	fn cancel(&mut self, token: TimerToken);
}

/// Deterministic [`TimerHost`] for headless hosts and tests.
///
/// Timers never fire on their own; the owner drains the pending token with
/// [`take_pending`](Self::take_pending) and hands it back to the engine
/// whenever it decides the debounce window has passed.
#[derive(Debug, Default)]
pub struct ManualTimers {
	next: u64,
	pending: Option<TimerToken>,
}

impl ManualTimers {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Take the pending timer, if any, so it can be fed to the engine.
	pub fn take_pending(&mut self) -> Option<TimerToken> {
		self.pending.take()
	}
}

impl TimerHost for ManualTimers {
	fn schedule_once(&mut self, _delay: Duration) -> TimerToken {
		self.next += 1;
		let token = TimerToken::new(self.next);
		self.pending = Some(token);
		token
	}

	fn cancel(&mut self, token: TimerToken) {
		if self.pending == Some(token) {
			self.pending = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scheduling_replaces_the_pending_token() {
		let mut timers = ManualTimers::new();
		let first = timers.schedule_once(Duration::from_millis(200));
		let second = timers.schedule_once(Duration::from_millis(200));
		assert_ne!(first, second);
		assert_eq!(timers.take_pending(), Some(second));
		assert_eq!(timers.take_pending(), None);
	}

	#[test]
	fn cancelling_a_stale_token_leaves_the_pending_one() {
		let mut timers = ManualTimers::new();
		let first = timers.schedule_once(Duration::from_millis(200));
		let second = timers.schedule_once(Duration::from_millis(200));
		timers.cancel(first);
		assert_eq!(timers.take_pending(), Some(second));
	}
}
