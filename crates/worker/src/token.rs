use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Monotonic generation counter for one request pipeline.
///
/// Every issued request receives a fresh generation. Only the most recently
/// issued generation is current; anything older is stale and its completion
/// must not be committed. Issuing or invalidating also cancels the previous
/// in-flight token so the superseded work can stop early.
#[derive(Debug, Default)]
pub struct GenerationClock {
	current: u64,
	in_flight: Option<GenerationToken>,
}

impl GenerationClock {
	/// Creates a clock at generation 0 with nothing in flight.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current generation.
	pub const fn current(&self) -> u64 {
		self.current
	}

	/// Returns true when `generation` is the latest issued generation.
	pub const fn is_current(&self, generation: u64) -> bool {
		self.current == generation
	}

	/// Returns true while the current generation has not been settled.
	pub const fn is_in_flight(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Supersedes the previous generation and issues a new one.
	pub fn issue(&mut self) -> GenerationToken {
		self.advance();
		let token = GenerationToken {
			generation: self.current,
			cancel: CancellationToken::new(),
		};
		self.in_flight = Some(token.clone());
		token
	}

	/// Makes every outstanding generation stale without issuing a new request.
	pub fn invalidate(&mut self) {
		self.advance();
	}

	/// Marks `generation` as resolved.
	///
	/// Returns false, leaving state untouched, when `generation` is stale.
	pub fn settle(&mut self, generation: u64) -> bool {
		if !self.is_current(generation) {
			return false;
		}
		self.in_flight = None;
		true
	}

	fn advance(&mut self) {
		if let Some(previous) = self.in_flight.take() {
			previous.cancel();
		}
		self.current = self.current.wrapping_add(1);
	}
}

/// Generation-scoped cancellation token carried by one in-flight request.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// True once a newer generation was issued or the clock was invalidated.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Drives `fut` until it completes or this generation is cancelled.
	///
	/// Returns `None` on cancellation; the future is dropped at that point.
	pub async fn run<F>(&self, fut: F) -> Option<F::Output>
	where
		F: Future,
	{
		tokio::select! {
			biased;
			_ = self.cancel.cancelled() => None,
			output = fut => Some(output),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn issue_supersedes_and_cancels_previous() {
		let mut clock = GenerationClock::new();
		let first = clock.issue();
		let second = clock.issue();

		assert!(first.is_cancelled());
		assert!(!second.is_cancelled());
		assert!(!clock.is_current(first.generation()));
		assert!(clock.is_current(second.generation()));
	}

	#[test]
	fn settle_rejects_stale_generation() {
		let mut clock = GenerationClock::new();
		let stale = clock.issue().generation();
		let latest = clock.issue().generation();

		assert!(!clock.settle(stale));
		assert!(clock.is_in_flight());
		assert!(clock.settle(latest));
		assert!(!clock.is_in_flight());
	}

	#[test]
	fn invalidate_stales_in_flight_without_new_request() {
		let mut clock = GenerationClock::new();
		let token = clock.issue();
		clock.invalidate();

		assert!(token.is_cancelled());
		assert!(!clock.is_in_flight());
		assert!(!clock.settle(token.generation()));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn run_returns_none_once_cancelled() {
		let mut clock = GenerationClock::new();
		let token = clock.issue();
		let task = tokio::spawn({
			let token = token.clone();
			async move { token.run(tokio::time::sleep(Duration::from_secs(5))).await }
		});

		tokio::task::yield_now().await;
		clock.invalidate();
		assert_eq!(task.await.ok(), Some(None));
	}

	#[tokio::test(flavor = "current_thread")]
	async fn run_passes_output_through() {
		let token = GenerationClock::new().issue();
		assert_eq!(token.run(async { "done" }).await, Some("done"));
	}
}
