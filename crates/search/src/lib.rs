//! Search-as-you-type coordination core.
//!
//! # Purpose
//!
//! * Turns a rapidly changing query string into settled queries ([`debounce`]).
//! * Runs the suggestion pipeline for settled queries ([`suggestions`]).
//! * Runs the detail pipeline for the selected item ([`details`]).
//! * Aggregates both behind [`SearchWidget`], the only place events are applied.
//!
//! # Mental model
//!
//! * Every fetch is issued under a generation from a per-pipeline
//!   [`lookahead_worker::GenerationClock`]. Issuing a new fetch, or clearing
//!   the pipeline input, supersedes the previous generation.
//! * Spawned work never touches widget state. Timers and fetches post
//!   [`WidgetEvent`]s into the widget's ingress queue; the owner drains them with
//!   [`SearchWidget::drain_events`] or [`SearchWidget::next_event`].
//! * A completion is committed only when its generation is still current, so
//!   visible state always reflects the most recently issued request even when
//!   older requests resolve later.
//!
//! # Invariants
//!
//! * At most one debounce timer is armed per widget.
//! * At most one generation per pipeline can commit.
//! * After [`SearchWidget::shutdown`] no event mutates state.
//! * Fetch failures degrade to an empty list / absent detail and are logged.

mod api;
pub mod debounce;
pub mod details;
mod events;
pub mod suggestions;
mod types;
mod widget;

#[cfg(test)]
mod test_support;

pub use api::{CatalogApi, FetchError};
pub use debounce::{Debouncer, Fired};
pub use details::{DetailCoordinator, DetailPhase};
pub use events::{DetailFetched, FetchContext, SuggestionsFetched, WidgetEvent};
pub use suggestions::{SuggestionCoordinator, SuggestionPhase};
pub use types::{ItemDetail, ItemId, ItemSummary, Selection};
pub use widget::{DEFAULT_DEBOUNCE, SearchWidget, WidgetOptions, WidgetView};
