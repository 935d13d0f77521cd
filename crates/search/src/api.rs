use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ItemDetail, ItemId, ItemSummary};

/// Transport seam between the widget and the catalog backend.
///
/// Both calls are idempotent reads. Implementations must report non-2xx
/// responses and undecodable bodies as errors.
#[async_trait]
pub trait CatalogApi: Send + Sync {
	/// Returns items matching `query`, in backend order.
	async fn search(&self, query: &str) -> Result<Vec<ItemSummary>, FetchError>;

	/// Returns the full record for `id`.
	async fn fetch_details(&self, id: &ItemId) -> Result<ItemDetail, FetchError>;
}

/// Failure of one catalog call.
///
/// The widget never surfaces these; they are logged and the pipeline degrades
/// to an empty list or absent detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// Backend answered with a non-2xx status.
	#[error("request to {url} failed with status {status}")]
	Status { status: u16, url: String },

	/// Connection, TLS or timeout failure.
	#[error("transport error: {0}")]
	Transport(String),

	/// Body could not be decoded into the expected shape.
	#[error("malformed response body: {0}")]
	Decode(String),

	/// Request could not be built (for example an unusable base URL).
	#[error("invalid request: {0}")]
	InvalidRequest(String),
}
