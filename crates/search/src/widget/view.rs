use std::sync::Arc;

use crate::types::{ItemDetail, ItemSummary, Selection};

/// Snapshot of everything a frontend needs to draw the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
	pub raw_query: String,
	pub settled_query: String,
	pub suggestions: Arc<[ItemSummary]>,
	pub loading: bool,
	pub selection: Option<Selection>,
	pub detail: Option<Arc<ItemDetail>>,
	pub detail_loading: bool,
}

impl WidgetView {
	fn has_query(&self) -> bool {
		!self.settled_query.trim().is_empty()
	}

	/// Loading indicator: a search for a non-blank query is outstanding and nothing is selected.
	pub fn show_loading(&self) -> bool {
		self.loading && self.has_query() && self.selection.is_none()
	}

	/// Dropdown with rows.
	pub fn show_suggestions(&self) -> bool {
		!self.suggestions.is_empty() && !self.loading && self.selection.is_none()
	}

	/// Explicit "no results" row. Also shown after a failed search.
	pub fn show_no_results(&self) -> bool {
		!self.loading && self.has_query() && self.suggestions.is_empty() && self.selection.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn view() -> WidgetView {
		WidgetView {
			raw_query: "lap".into(),
			settled_query: "lap".into(),
			suggestions: Arc::from(Vec::new()),
			loading: false,
			selection: None,
			detail: None,
			detail_loading: false,
		}
	}

	#[test]
	fn loading_hides_list_and_no_results() {
		let view = WidgetView {
			loading: true,
			suggestions: Arc::from(vec![ItemSummary::new(1u64, "Laptop")]),
			..view()
		};
		assert!(view.show_loading());
		assert!(!view.show_suggestions());
		assert!(!view.show_no_results());
	}

	#[test]
	fn empty_list_for_query_shows_no_results() {
		let view = view();
		assert!(!view.show_loading());
		assert!(!view.show_suggestions());
		assert!(view.show_no_results());
	}

	#[test]
	fn blank_query_shows_nothing() {
		let view = WidgetView {
			settled_query: " ".into(),
			loading: true,
			..view()
		};
		assert!(!view.show_loading());
		assert!(!view.show_no_results());
	}

	#[test]
	fn selection_hides_dropdown() {
		let view = WidgetView {
			suggestions: Arc::from(vec![ItemSummary::new(1u64, "Laptop")]),
			selection: Some(Selection {
				id: 1u64.into(),
				name: "Laptop".into(),
			}),
			..view()
		};
		assert!(!view.show_suggestions());
		assert!(!view.show_no_results());
		assert!(!view.show_loading());
	}
}
