//! Plain-text rendering of a [`WidgetView`].

use std::fmt;

use lookahead_search::WidgetView;

/// Displays a view as a few indented lines.
pub struct Screen<'a>(pub &'a WidgetView);

impl fmt::Display for Screen<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let view = self.0;
		writeln!(f, "> {}", view.raw_query)?;

		if view.show_loading() {
			writeln!(f, "  searching...")?;
		}
		if view.show_suggestions() {
			for (index, item) in view.suggestions.iter().enumerate() {
				writeln!(f, "  {:>2}. {}", index + 1, item.name)?;
			}
		}
		if view.show_no_results() {
			writeln!(f, "  no results")?;
		}

		let Some(selection) = &view.selection else {
			return Ok(());
		};
		writeln!(f, "= {} (#{})", selection.name, selection.id)?;
		if view.detail_loading {
			writeln!(f, "  loading details...")?;
		}
		if let Some(detail) = &view.detail {
			if let Some(price) = detail.price {
				writeln!(f, "  price: {price:.2}")?;
			}
			if let Some(description) = &detail.description {
				writeln!(f, "  {description}")?;
			}
			if let Some(image) = &detail.image {
				writeln!(f, "  image: {image}")?;
			}
		}
		Ok(())
	}
}
