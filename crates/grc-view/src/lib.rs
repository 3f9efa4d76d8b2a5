//! View-state glue around the card engine.
//!
//! The card engine turns items into sorted cards; this crate covers what
//! the overview does around it:
//! - URL query parameters (collapse flag, tab index, highlight, side panel)
//! - Drill-down: turning a tile click into new filters and a new query
//! - The card choice dropdown and its persisted selection
//! - The overview view model (header, cards and tiles, empty state)

pub mod choices;
pub mod drill_down;
pub mod overview;
pub mod query;

pub use choices::{select, select_and_save, CardChoiceOption, CardChoiceOptions};
pub use drill_down::{apply_drill_down, drill_down, drill_down_query, drill_down_value, DrillDown};
pub use overview::{
    CardView, GrcOverview, NoResource, OverviewBody, OverviewContext, OverviewHeader,
    OverviewInput, TileView,
};
pub use query::{toggle_card_collapse, QueryParams, ViewParams};
