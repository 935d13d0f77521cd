//! Search widget aggregate.
//!
//! # Purpose
//!
//! * Owns the raw query, the debouncer, both fetch pipelines and the selection.
//! * Is the single place where [`WidgetEvent`]s are applied.
//!
//! # Data flow
//!
//! 1. Frontend calls [`SearchWidget::set_query`] on every keystroke.
//! 2. The debouncer rearms its timer; when it fires, a `QuerySettled` event is queued.
//! 3. Applying it publishes the settled query and drives the suggestion pipeline.
//! 4. [`SearchWidget::select`] clears the list and drives the detail pipeline.
//! 5. Fetch completions are queued as events and committed only if still current.
//!
//! # Lifecycle
//!
//! * Create with [`SearchWidget::new`] inside a tokio runtime context.
//! * Drain with [`SearchWidget::drain_events`] from a tick loop, or await
//!   [`SearchWidget::next_event`] from an async driver.
//! * [`SearchWidget::shutdown`] (or drop) cancels the timer and stales both
//!   pipelines; later events are ignored.

mod view;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

pub use self::view::WidgetView;
use crate::api::CatalogApi;
use crate::debounce::Debouncer;
use crate::details::DetailCoordinator;
use crate::events::{FetchContext, WidgetEvent};
use crate::suggestions::SuggestionCoordinator;
use crate::types::{ItemSummary, Selection};

/// Quiet interval before a typed query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
	pub debounce: Duration,
}

impl Default for WidgetOptions {
	fn default() -> Self {
		Self { debounce: DEFAULT_DEBOUNCE }
	}
}

#[derive(Debug)]
pub struct SearchWidget {
	raw_query: String,
	debouncer: Debouncer<String>,
	suggestions: SuggestionCoordinator,
	details: DetailCoordinator,
	selection: Option<Selection>,
	ctx: FetchContext,
	events_rx: mpsc::UnboundedReceiver<WidgetEvent>,
	shut_down: bool,
}

impl SearchWidget {
	pub fn new(api: Arc<dyn CatalogApi>, options: WidgetOptions) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		let timer_tx = events_tx.clone();
		let debouncer = Debouncer::new(String::new(), options.debounce, move |fired| {
			let _ = timer_tx.send(WidgetEvent::QuerySettled(fired));
		});

		Self {
			raw_query: String::new(),
			debouncer,
			suggestions: SuggestionCoordinator::new(),
			details: DetailCoordinator::new(),
			selection: None,
			ctx: FetchContext::new(api, events_tx),
			events_rx,
			shut_down: false,
		}
	}

	pub fn raw_query(&self) -> &str {
		&self.raw_query
	}

	pub fn settled_query(&self) -> &str {
		self.debouncer.settled()
	}

	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	pub fn suggestions(&self) -> &SuggestionCoordinator {
		&self.suggestions
	}

	pub fn details(&self) -> &DetailCoordinator {
		&self.details
	}

	pub fn is_shut_down(&self) -> bool {
		self.shut_down
	}

	/// No debounce timer is armed and neither pipeline is waiting on a fetch.
	pub fn is_idle(&self) -> bool {
		!self.debouncer.is_pending() && !self.suggestions.is_loading() && !self.details.is_loading()
	}

	/// Keystroke: replaces the raw query and restarts the quiet interval.
	///
	/// Resuming typing drops the current selection. Selecting emptied the
	/// list, so the next settled query is searched even if it is unchanged.
	pub fn set_query(&mut self, text: impl Into<String>) {
		if self.shut_down {
			return;
		}
		self.raw_query = text.into();
		if self.selection.take().is_some() {
			debug!("widget.selection_cleared_by_typing");
			self.details.on_selection(None, &self.ctx);
			self.debouncer.republish_next();
		}
		self.debouncer.schedule(self.raw_query.clone());
	}

	/// Changes the debounce interval; a different interval restarts the timer.
	pub fn set_debounce(&mut self, delay: Duration) {
		if self.shut_down {
			return;
		}
		self.debouncer.set_delay(delay, self.raw_query.clone());
	}

	/// The user picked `item` from the suggestions.
	pub fn select(&mut self, item: &ItemSummary) {
		if self.shut_down {
			return;
		}
		let selection = Selection::from(item);
		debug!(id = %selection.id, "widget.select");
		self.suggestions.clear_list();
		self.details.on_selection(Some(&selection.id), &self.ctx);
		self.selection = Some(selection);
	}

	/// Selects the `index`-th (0-based) suggestion currently listed.
	pub fn select_index(&mut self, index: usize) -> Option<Selection> {
		if self.shut_down {
			return None;
		}
		let item = self.suggestions.items().get(index).cloned()?;
		self.select(&item);
		self.selection.clone()
	}

	pub fn clear_selection(&mut self) {
		if self.shut_down {
			return;
		}
		if self.selection.take().is_some() {
			self.details.on_selection(None, &self.ctx);
		}
	}

	/// Applies one event. Returns whether visible state changed.
	pub fn apply(&mut self, event: WidgetEvent) -> bool {
		if self.shut_down {
			return false;
		}
		match event {
			WidgetEvent::QuerySettled(fired) => match self.debouncer.accept(fired) {
				Some(query) => {
					debug!(query = %query, "widget.query_settled");
					self.suggestions.on_settled(&query, &self.ctx);
					true
				}
				None => false,
			},
			WidgetEvent::Suggestions(fetched) => self.suggestions.apply(fetched),
			WidgetEvent::Detail(fetched) => self.details.apply(fetched),
		}
	}

	/// Applies every queued event without waiting.
	///
	/// Returns how many of them changed visible state.
	pub fn drain_events(&mut self) -> usize {
		let mut changed = 0;
		while let Ok(event) = self.events_rx.try_recv() {
			if self.apply(event) {
				changed += 1;
			}
		}
		changed
	}

	/// Waits for the next event and applies it.
	///
	/// Returns `Some(changed)`, or `None` once the widget is shut down.
	pub async fn next_event(&mut self) -> Option<bool> {
		if self.shut_down {
			return None;
		}
		let event = self.events_rx.recv().await?;
		Some(self.apply(event))
	}

	pub fn view(&self) -> WidgetView {
		WidgetView {
			raw_query: self.raw_query.clone(),
			settled_query: self.debouncer.settled().clone(),
			suggestions: self.suggestions.items_shared(),
			loading: self.suggestions.is_loading(),
			selection: self.selection.clone(),
			detail: self.details.detail().cloned(),
			detail_loading: self.details.is_loading(),
		}
	}

	/// Tears the widget down: no timer fires and no fetch commits afterwards.
	pub fn shutdown(&mut self) {
		if self.shut_down {
			return;
		}
		self.shut_down = true;
		self.debouncer.cancel();
		self.suggestions.shutdown();
		self.details.shutdown();
		self.events_rx.close();
		debug!("widget.shutdown");
	}
}

impl Drop for SearchWidget {
	fn drop(&mut self) {
		self.shutdown();
	}
}
