use std::time::Duration;

use tokio::task::JoinHandle;

use crate::{TaskClass, spawn};

/// Single-slot timer: at most one timer is armed at any instant.
///
/// Arming aborts the previous timer before the new one is spawned. Each arm
/// gets an epoch; the fire callback receives it so the owner can tell, when the
/// notification is eventually drained, whether it still belongs to the armed
/// timer ([`Self::take_fired`]). A timer that fired but was cancelled before its
/// notification was drained is rejected there.
#[derive(Debug, Default)]
pub struct TimerSlot {
	epoch: u64,
	armed: Option<ArmedTimer>,
}

#[derive(Debug)]
struct ArmedTimer {
	epoch: u64,
	handle: JoinHandle<()>,
}

impl TimerSlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Arms a timer of length `delay`, cancelling any armed one first.
	///
	/// `on_fire` runs on the runtime once the delay elapses, with the epoch
	/// returned here.
	pub fn arm<F>(&mut self, delay: Duration, on_fire: F) -> u64
	where
		F: FnOnce(u64) + Send + 'static,
	{
		self.cancel();
		self.epoch = self.epoch.wrapping_add(1);
		let epoch = self.epoch;
		let deadline = tokio::time::Instant::now() + delay;
		let handle = spawn(TaskClass::Interactive, async move {
			tokio::time::sleep_until(deadline).await;
			on_fire(epoch);
		});
		self.armed = Some(ArmedTimer { epoch, handle });
		epoch
	}

	/// Cancels the armed timer. Returns whether one was armed.
	pub fn cancel(&mut self) -> bool {
		match self.armed.take() {
			Some(timer) => {
				timer.handle.abort();
				true
			}
			None => false,
		}
	}

	/// Returns true while a timer is armed and its fire has not been taken.
	pub fn is_armed(&self) -> bool {
		self.armed.is_some()
	}

	/// Consumes a fire notification.
	///
	/// Returns true and disarms the slot when `epoch` is the armed timer.
	pub fn take_fired(&mut self, epoch: u64) -> bool {
		match &self.armed {
			Some(timer) if timer.epoch == epoch => {
				self.armed = None;
				true
			}
			_ => false,
		}
	}
}

impl Drop for TimerSlot {
	fn drop(&mut self) {
		self.cancel();
	}
}
