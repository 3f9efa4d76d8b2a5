//! Drill-down from a card tile into the filtered table.
//!
//! A click adds the card's name to the active filters for its kind and
//! moves the page to the table tab matching the clicked tile, with the
//! cards collapsed.

use crate::query::QueryParams;
use grc_cards::{start_case, DrillDownTarget, EntityType};
use grc_common::ActiveFilters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// New filter state and query string after a drill-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillDown {
    pub filters: ActiveFilters,
    pub query: String,
}

/// Filter value for a clicked card name, in the form the filter sidebar uses.
pub fn drill_down_value(display_name: &str) -> String {
    start_case(&display_name.replacen(' ', "-", 1))
}

/// Filters with the clicked card added. The input is left untouched.
pub fn apply_drill_down(filters: &ActiveFilters, target: &DrillDownTarget) -> ActiveFilters {
    filters.with_value(target.kind.as_str(), drill_down_value(&target.display_name))
}

/// Query string for the drilled-down page.
///
/// Cluster tiles open the cluster tab (`index=1`), every other tile the
/// policy tab. A non-empty `filters` parameter of the current query is
/// carried over as-is.
pub fn drill_down_query(target: &DrillDownTarget, current_query: &str) -> String {
    let mut params = QueryParams::new();
    params.set("card", "false");
    params.set("toggle", "false");
    let index = if target.entity == EntityType::Cluster { "1" } else { "0" };
    params.set("index", index);

    let mut query = params.stringify();
    let current = QueryParams::parse(current_query);
    if let Some(search) = current.get("filters").filter(|search| !search.is_empty()) {
        query.push_str("&filters=");
        query.push_str(search);
    }
    query
}

/// Both halves of a drill-down at once.
pub fn drill_down(
    filters: &ActiveFilters,
    target: &DrillDownTarget,
    current_query: &str,
) -> DrillDown {
    let next = DrillDown {
        filters: apply_drill_down(filters, target),
        query: drill_down_query(target, current_query),
    };
    debug!(
        kind = %target.kind,
        name = %target.display_name,
        entity = %target.entity,
        query = %next.query,
        "drill down"
    );
    next
}
