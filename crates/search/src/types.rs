use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog item identifier.
///
/// Backends send ids as JSON numbers or strings; both are accepted and kept
/// as sent, so `42` and `"42"` are distinct ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
	Number(u64),
	Text(String),
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

impl From<u64> for ItemId {
	fn from(value: u64) -> Self {
		Self::Number(value)
	}
}

impl From<&str> for ItemId {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for ItemId {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

/// One suggestion row returned by the search endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
	pub id: ItemId,
	pub name: String,
	/// Fields the widget does not interpret.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl ItemSummary {
	pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			extra: Map::new(),
		}
	}
}

/// Full item record returned by the detail endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
	pub id: ItemId,
	pub name: String,
	pub image: Option<String>,
	pub description: Option<String>,
	pub price: Option<f64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl ItemDetail {
	pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			image: None,
			description: None,
			price: None,
			extra: Map::new(),
		}
	}
}

/// The item the user picked from the suggestion list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
	pub id: ItemId,
	pub name: String,
}

impl From<&ItemSummary> for Selection {
	fn from(item: &ItemSummary) -> Self {
		Self {
			id: item.id.clone(),
			name: item.name.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn ids_accept_numbers_and_strings() {
		let items: Vec<ItemSummary> = serde_json::from_value(json!([
			{ "id": 1, "name": "Phone X" },
			{ "id": "sku-9", "name": "Laptop" },
		]))
		.expect("valid payload");

		assert_eq!(items[0].id, ItemId::Number(1));
		assert_eq!(items[1].id, ItemId::from("sku-9"));
		assert_eq!(items[0].id.to_string(), "1");
	}

	#[test]
	fn unknown_fields_are_preserved() {
		let item: ItemSummary = serde_json::from_value(json!({ "id": 3, "name": "Tablet", "category": "tech" })).expect("valid payload");
		assert_eq!(item.extra.get("category"), Some(&json!("tech")));
	}

	#[test]
	fn detail_optional_fields_default_to_none() {
		let detail: ItemDetail = serde_json::from_value(json!({
			"id": 7,
			"name": "Mouse",
			"price": 19.5,
			"stock": 4,
		}))
		.expect("valid payload");

		assert_eq!(detail.price, Some(19.5));
		assert_eq!(detail.image, None);
		assert_eq!(detail.description, None);
		assert_eq!(detail.extra.get("stock"), Some(&json!(4)));
	}

	#[test]
	fn selection_from_summary() {
		let selection = Selection::from(&ItemSummary::new(42u64, "Answer"));
		assert_eq!(
			selection,
			Selection {
				id: ItemId::Number(42),
				name: "Answer".into(),
			}
		);
	}
}
