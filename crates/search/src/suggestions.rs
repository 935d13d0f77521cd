//! Suggestion pipeline: one search per settled query, latest generation wins.

use std::sync::Arc;

use lookahead_worker::{GenerationClock, TaskClass};
use tracing::{debug, trace, warn};

use crate::events::{FetchContext, SuggestionsFetched, WidgetEvent};
use crate::types::ItemSummary;

/// Observable state of the suggestion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionPhase {
	/// Nothing has been settled yet.
	Idle,
	/// A search for `query` is outstanding.
	Loading { query: String },
	/// The latest search resolved (or the query is blank and no search ran).
	Settled { query: String, items: Arc<[ItemSummary]> },
	/// The latest search failed; renders as an empty list.
	Failed { query: String },
}

/// Drives `search` calls for settled queries and commits only the latest result.
#[derive(Debug)]
pub struct SuggestionCoordinator {
	phase: SuggestionPhase,
	generations: GenerationClock,
}

impl Default for SuggestionCoordinator {
	fn default() -> Self {
		Self::new()
	}
}

impl SuggestionCoordinator {
	pub fn new() -> Self {
		Self {
			phase: SuggestionPhase::Idle,
			generations: GenerationClock::new(),
		}
	}

	pub fn phase(&self) -> &SuggestionPhase {
		&self.phase
	}

	/// Current suggestion list; empty unless the latest search succeeded.
	pub fn items(&self) -> &[ItemSummary] {
		match &self.phase {
			SuggestionPhase::Settled { items, .. } => items,
			_ => &[],
		}
	}

	pub(crate) fn items_shared(&self) -> Arc<[ItemSummary]> {
		match &self.phase {
			SuggestionPhase::Settled { items, .. } => Arc::clone(items),
			_ => Arc::from(Vec::new()),
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self.phase, SuggestionPhase::Loading { .. })
	}

	/// Generation of the most recently issued (or invalidated) search.
	pub fn generation(&self) -> u64 {
		self.generations.current()
	}

	/// Reacts to a new settled query.
	///
	/// A blank query settles immediately to an empty list without fetching.
	/// Otherwise the previous search is superseded and `search(query)` is issued.
	pub fn on_settled(&mut self, query: &str, ctx: &FetchContext) {
		if query.trim().is_empty() {
			self.generations.invalidate();
			self.phase = SuggestionPhase::Settled {
				query: query.to_owned(),
				items: Arc::from(Vec::new()),
			};
			debug!(generation = self.generations.current(), "suggestions.blank_query");
			return;
		}

		let token = self.generations.issue();
		let generation = token.generation();
		self.phase = SuggestionPhase::Loading { query: query.to_owned() };
		debug!(generation, query, "suggestions.issue");

		let api = ctx.api();
		let events = ctx.events();
		let query = query.to_owned();
		lookahead_worker::spawn(TaskClass::Background, async move {
			let Some(outcome) = token.run(api.search(&query)).await else {
				trace!(generation, "suggestions.fetch_aborted");
				return;
			};
			let _ = events.send(WidgetEvent::Suggestions(SuggestionsFetched { generation, query, outcome }));
		});
	}

	/// Commits a search completion if it belongs to the latest generation.
	///
	/// Returns whether visible state changed.
	pub fn apply(&mut self, fetched: SuggestionsFetched) -> bool {
		let SuggestionsFetched { generation, query, outcome } = fetched;
		if !self.generations.settle(generation) {
			trace!(generation, current = self.generations.current(), "suggestions.stale_dropped");
			return false;
		}

		self.phase = match outcome {
			Ok(items) => {
				debug!(generation, count = items.len(), "suggestions.settled");
				SuggestionPhase::Settled {
					query,
					items: Arc::from(items),
				}
			}
			Err(error) => {
				warn!(generation, query = %query, %error, "suggestions.fetch_failed");
				SuggestionPhase::Failed { query }
			}
		};
		true
	}

	/// Empties the visible list (the user picked an item).
	///
	/// An outstanding search keeps running and still commits when it resolves.
	pub fn clear_list(&mut self) -> bool {
		match &mut self.phase {
			SuggestionPhase::Settled { items, .. } if !items.is_empty() => {
				*items = Arc::from(Vec::new());
				true
			}
			_ => false,
		}
	}

	/// Makes every outstanding search stale.
	pub fn shutdown(&mut self) {
		self.generations.invalidate();
	}
}
