//! Debounced value emitter.
//!
//! [`Debouncer::schedule`] is called on every raw change and (re)arms one
//! timer. When the timer fires, the captured value is handed to the sink as a
//! [`Fired`] notification; the owner feeds it back through
//! [`Debouncer::accept`], which publishes it as the settled value only if the
//! notification still belongs to the armed timer. Rapid changes therefore
//! publish nothing until the value has been quiet for the full delay.

use std::sync::Arc;
use std::time::Duration;

use lookahead_worker::TimerSlot;

/// Timer-fired notification carrying the value captured when the timer was armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
	pub epoch: u64,
	pub value: T,
}

type Sink<T> = Arc<dyn Fn(Fired<T>) + Send + Sync>;

pub struct Debouncer<T> {
	delay: Duration,
	settled: T,
	republish: bool,
	timer: TimerSlot,
	sink: Sink<T>,
}

impl<T> std::fmt::Debug for Debouncer<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Debouncer")
			.field("delay", &self.delay)
			.field("settled", &self.settled)
			.field("pending", &self.timer.is_armed())
			.finish()
	}
}

impl<T> Debouncer<T>
where
	T: Clone + PartialEq + Send + 'static,
{
	/// Creates an emitter whose settled value starts at `initial`. No timer is armed.
	pub fn new<F>(initial: T, delay: Duration, sink: F) -> Self
	where
		F: Fn(Fired<T>) + Send + Sync + 'static,
	{
		Self {
			delay,
			settled: initial,
			republish: false,
			timer: TimerSlot::new(),
			sink: Arc::new(sink),
		}
	}

	pub fn settled(&self) -> &T {
		&self.settled
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Returns true while a timer is armed and not yet accepted.
	pub fn is_pending(&self) -> bool {
		self.timer.is_armed()
	}

	/// Restarts the quiet interval with `value` as the candidate.
	pub fn schedule(&mut self, value: T) {
		let sink = Arc::clone(&self.sink);
		let epoch = self.timer.arm(self.delay, move |epoch| sink(Fired { epoch, value }));
		tracing::trace!(epoch, delay = ?self.delay, "debounce.schedule");
	}

	/// Changes the delay. A different delay restarts the timer with `current`.
	pub fn set_delay(&mut self, delay: Duration, current: T) {
		if delay == self.delay {
			return;
		}
		self.delay = delay;
		self.schedule(current);
	}

	/// Makes the next accepted fire publish even when its value equals the
	/// settled value. Consumers that discarded output derived from the settled
	/// value use this to have it derived again.
	pub fn republish_next(&mut self) {
		self.republish = true;
	}

	/// Takes a fire notification.
	///
	/// Returns the new settled value when the notification comes from the
	/// armed timer and the value differs from the current settled value, or
	/// [`Self::republish_next`] was requested since the last publish.
	pub fn accept(&mut self, fired: Fired<T>) -> Option<T> {
		if !self.timer.take_fired(fired.epoch) {
			tracing::trace!(epoch = fired.epoch, "debounce.fire_superseded");
			return None;
		}
		if fired.value == self.settled && !self.republish {
			return None;
		}
		self.republish = false;
		self.settled = fired.value.clone();
		Some(fired.value)
	}

	/// Cancels the pending timer, if any. Returns whether one was pending.
	pub fn cancel(&mut self) -> bool {
		self.timer.cancel()
	}
}
