//! Detail pipeline: fetch the record for the selected item.

use std::sync::Arc;

use lookahead_worker::{GenerationClock, TaskClass};
use tracing::{debug, trace, warn};

use crate::events::{DetailFetched, FetchContext, WidgetEvent};
use crate::types::{ItemDetail, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
	Absent,
	Loading { id: ItemId },
	Present { id: ItemId, detail: Arc<ItemDetail> },
}

/// Drives `fetch_details` for the selected id.
///
/// There is no automatic retry: after a failure the phase is [`DetailPhase::Absent`]
/// and selecting the same id again issues a new lookup.
#[derive(Debug)]
pub struct DetailCoordinator {
	phase: DetailPhase,
	generations: GenerationClock,
}

impl Default for DetailCoordinator {
	fn default() -> Self {
		Self::new()
	}
}

impl DetailCoordinator {
	pub fn new() -> Self {
		Self {
			phase: DetailPhase::Absent,
			generations: GenerationClock::new(),
		}
	}

	pub fn phase(&self) -> &DetailPhase {
		&self.phase
	}

	pub fn detail(&self) -> Option<&Arc<ItemDetail>> {
		match &self.phase {
			DetailPhase::Present { detail, .. } => Some(detail),
			_ => None,
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self.phase, DetailPhase::Loading { .. })
	}

	pub fn generation(&self) -> u64 {
		self.generations.current()
	}

	/// Reacts to the selected id changing. Returns whether visible state changed.
	pub fn on_selection(&mut self, id: Option<&ItemId>, ctx: &FetchContext) -> bool {
		let Some(id) = id else {
			self.generations.invalidate();
			let changed = self.phase != DetailPhase::Absent;
			self.phase = DetailPhase::Absent;
			debug!(generation = self.generations.current(), "details.cleared");
			return changed;
		};

		match &self.phase {
			DetailPhase::Loading { id: current } | DetailPhase::Present { id: current, .. } if current == id => return false,
			_ => {}
		}

		let token = self.generations.issue();
		let generation = token.generation();
		self.phase = DetailPhase::Loading { id: id.clone() };
		debug!(generation, %id, "details.issue");

		let api = ctx.api();
		let events = ctx.events();
		let id = id.clone();
		lookahead_worker::spawn(TaskClass::Background, async move {
			let Some(outcome) = token.run(api.fetch_details(&id)).await else {
				trace!(generation, "details.fetch_aborted");
				return;
			};
			let _ = events.send(WidgetEvent::Detail(DetailFetched { generation, id, outcome }));
		});
		true
	}

	/// Commits a lookup completion if it belongs to the latest generation.
	pub fn apply(&mut self, fetched: DetailFetched) -> bool {
		let DetailFetched { generation, id, outcome } = fetched;
		let loading_this = matches!(&self.phase, DetailPhase::Loading { id: current } if *current == id);
		if !loading_this || !self.generations.settle(generation) {
			trace!(generation, %id, current = self.generations.current(), "details.stale_dropped");
			return false;
		}

		self.phase = match outcome {
			Ok(detail) => {
				debug!(generation, %id, "details.present");
				DetailPhase::Present {
					id,
					detail: Arc::new(detail),
				}
			}
			Err(error) => {
				warn!(generation, %id, %error, "details.fetch_failed");
				DetailPhase::Absent
			}
		};
		true
	}

	/// Makes every outstanding lookup stale.
	pub fn shutdown(&mut self) {
		self.generations.invalidate();
	}
}
