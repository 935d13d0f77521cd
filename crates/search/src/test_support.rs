//! In-memory catalog with test-controlled completion order.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::api::{CatalogApi, FetchError};
use crate::types::{ItemDetail, ItemId, ItemSummary};

type SearchReply = Result<Vec<ItemSummary>, FetchError>;
type DetailReply = Result<ItemDetail, FetchError>;

/// Catalog double.
///
/// Calls with a canned answer resolve immediately. All other calls park until
/// the test releases them, which lets tests resolve requests in any order.
#[derive(Default)]
pub(crate) struct ScriptedCatalog {
	state: Mutex<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
	search_answers: HashMap<String, SearchReply>,
	detail_answers: HashMap<ItemId, DetailReply>,
	parked_searches: Vec<(String, oneshot::Sender<SearchReply>)>,
	parked_details: Vec<(ItemId, oneshot::Sender<DetailReply>)>,
	searches: Vec<String>,
	details: Vec<ItemId>,
}

impl ScriptedCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn answer_search(&self, query: &str, reply: SearchReply) {
		self.state.lock().search_answers.insert(query.to_owned(), reply);
	}

	pub fn answer_details(&self, id: impl Into<ItemId>, reply: DetailReply) {
		self.state.lock().detail_answers.insert(id.into(), reply);
	}

	/// Resolves the oldest parked search for `query`. Returns false if none is waiting.
	pub fn release_search(&self, query: &str, reply: SearchReply) -> bool {
		let mut state = self.state.lock();
		state.parked_searches.retain(|(_, tx)| !tx.is_closed());
		match state.parked_searches.iter().position(|(q, _)| q == query) {
			Some(index) => {
				let (_, tx) = state.parked_searches.remove(index);
				tx.send(reply).is_ok()
			}
			None => false,
		}
	}

	/// Resolves the oldest parked detail lookup for `id`. Returns false if none is waiting.
	pub fn release_details(&self, id: impl Into<ItemId>, reply: DetailReply) -> bool {
		let id = id.into();
		let mut state = self.state.lock();
		state.parked_details.retain(|(_, tx)| !tx.is_closed());
		match state.parked_details.iter().position(|(parked, _)| *parked == id) {
			Some(index) => {
				let (_, tx) = state.parked_details.remove(index);
				tx.send(reply).is_ok()
			}
			None => false,
		}
	}

	/// Every search issued so far, in call order.
	pub fn searches(&self) -> Vec<String> {
		self.state.lock().searches.clone()
	}

	/// Every detail lookup issued so far, in call order.
	pub fn details(&self) -> Vec<ItemId> {
		self.state.lock().details.clone()
	}
}

#[async_trait]
impl CatalogApi for ScriptedCatalog {
	async fn search(&self, query: &str) -> Result<Vec<ItemSummary>, FetchError> {
		let rx = {
			let mut state = self.state.lock();
			state.searches.push(query.to_owned());
			if let Some(reply) = state.search_answers.get(query) {
				return reply.clone();
			}
			let (tx, rx) = oneshot::channel();
			state.parked_searches.push((query.to_owned(), tx));
			rx
		};
		rx.await.unwrap_or_else(|_| Err(FetchError::Transport("scripted search dropped".into())))
	}

	async fn fetch_details(&self, id: &ItemId) -> Result<ItemDetail, FetchError> {
		let rx = {
			let mut state = self.state.lock();
			state.details.push(id.clone());
			if let Some(reply) = state.detail_answers.get(id) {
				return reply.clone();
			}
			let (tx, rx) = oneshot::channel();
			state.parked_details.push((id.clone(), tx));
			rx
		};
		rx.await.unwrap_or_else(|_| Err(FetchError::Transport("scripted lookup dropped".into())))
	}
}

/// Lets spawned timer and fetch tasks run to their next suspension point.
pub(crate) async fn settle_tasks() {
	for _ in 0..16 {
		tokio::task::yield_now().await;
	}
}
