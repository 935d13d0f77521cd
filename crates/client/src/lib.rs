//! HTTP catalog backend.
//!
//! Implements [`CatalogApi`] against a REST catalog exposing
//! `GET /products?search=<query>` and `GET /products/<id>`.

use std::time::Duration;

use async_trait::async_trait;
use lookahead_search::{CatalogApi, FetchError, ItemDetail, ItemId, ItemSummary};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors building an [`HttpCatalog`].
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("base URL {0} cannot carry path segments")]
	BaseUrl(Url),

	#[error("failed to build HTTP client: {0}")]
	Build(#[from] reqwest::Error),
}

/// reqwest-backed catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
	http: reqwest::Client,
	base: Url,
}

impl HttpCatalog {
	/// Creates a catalog rooted at `base`. `timeout` bounds each request when set.
	pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
		if base.cannot_be_a_base() {
			return Err(ClientError::BaseUrl(base));
		}
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		Ok(Self { http: builder.build()?, base })
	}

	pub fn base(&self) -> &Url {
		&self.base
	}

	/// `<base>/products?search=<query>`
	pub fn search_url(&self, query: &str) -> Result<Url, FetchError> {
		let mut url = self.products_url()?;
		url.query_pairs_mut().append_pair("search", query);
		Ok(url)
	}

	/// `<base>/products/<id>` with `id` encoded as one path segment.
	pub fn detail_url(&self, id: &ItemId) -> Result<Url, FetchError> {
		let mut url = self.products_url()?;
		url.path_segments_mut()
			.map_err(|()| FetchError::InvalidRequest(format!("base URL {} cannot carry path segments", self.base)))?
			.push(&id.to_string());
		Ok(url)
	}

	fn products_url(&self) -> Result<Url, FetchError> {
		let mut url = self.base.clone();
		url.set_query(None);
		url.path_segments_mut()
			.map_err(|()| FetchError::InvalidRequest(format!("base URL {} cannot carry path segments", self.base)))?
			.pop_if_empty()
			.push("products");
		Ok(url)
	}

	async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
		debug!(%url, "catalog.get");
		let response = self
			.http
			.get(url.clone())
			.header(ACCEPT, "application/json")
			.send()
			.await
			.map_err(|error| FetchError::Transport(error.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status {
				status: status.as_u16(),
				url: url.to_string(),
			});
		}

		let body = response.bytes().await.map_err(|error| FetchError::Transport(error.to_string()))?;
		serde_json::from_slice(&body).map_err(|error| FetchError::Decode(error.to_string()))
	}
}

#[async_trait]
impl CatalogApi for HttpCatalog {
	async fn search(&self, query: &str) -> Result<Vec<ItemSummary>, FetchError> {
		let url = self.search_url(query)?;
		self.get_json(url).await
	}

	async fn fetch_details(&self, id: &ItemId) -> Result<ItemDetail, FetchError> {
		let url = self.detail_url(id)?;
		self.get_json(url).await
	}
}
