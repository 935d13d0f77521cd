use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{CatalogApi, FetchError};
use crate::debounce::Fired;
use crate::types::{ItemDetail, ItemId, ItemSummary};

/// Ingress event for [`crate::SearchWidget`].
///
/// Timers and fetch tasks only ever produce these; state changes happen when
/// the owner applies them.
#[derive(Debug)]
pub enum WidgetEvent {
	QuerySettled(Fired<String>),
	Suggestions(SuggestionsFetched),
	Detail(DetailFetched),
}

/// Completion of one suggestion search.
#[derive(Debug)]
pub struct SuggestionsFetched {
	pub generation: u64,
	pub query: String,
	pub outcome: Result<Vec<ItemSummary>, FetchError>,
}

/// Completion of one detail lookup.
#[derive(Debug)]
pub struct DetailFetched {
	pub generation: u64,
	pub id: ItemId,
	pub outcome: Result<ItemDetail, FetchError>,
}

/// What a coordinator needs to issue a fetch: the catalog and the way back.
#[derive(Clone)]
pub struct FetchContext {
	api: Arc<dyn CatalogApi>,
	events: mpsc::UnboundedSender<WidgetEvent>,
}

impl FetchContext {
	pub fn new(api: Arc<dyn CatalogApi>, events: mpsc::UnboundedSender<WidgetEvent>) -> Self {
		Self { api, events }
	}

	pub(crate) fn api(&self) -> Arc<dyn CatalogApi> {
		Arc::clone(&self.api)
	}

	pub(crate) fn events(&self) -> mpsc::UnboundedSender<WidgetEvent> {
		self.events.clone()
	}
}

impl std::fmt::Debug for FetchContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FetchContext").field("events_closed", &self.events.is_closed()).finish_non_exhaustive()
	}
}
