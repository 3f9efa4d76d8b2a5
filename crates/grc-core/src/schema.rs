//! JSON Schema generation for the output types.
//!
//! ```bash
//! # List available schema types
//! grc-core schema --list
//!
//! # Generate schema for a specific type
//! grc-core schema GrcOverview
//!
//! # Generate all schemas
//! grc-core schema --all
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use grc_cards::{
    CardDatum, CountTile, DrillDownTarget, EntityType, FindingCard, FindingTile, PolicyCard,
    PolicyTile,
};
pub use grc_common::{ActiveFilters, CardChoice, DisplayMode, RawFinding, RawPolicy};
pub use grc_view::{CardChoiceOptions, DrillDown, GrcOverview, ViewParams};

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        // Selectors
        ("CardChoice", "Classification kind cards are grouped by"),
        ("DisplayMode", "Whether policies or findings are shown"),
        ("ActiveFilters", "Selected filter values per kind"),
        // Input resources
        ("RawPolicy", "Policy resource as delivered by the loader"),
        ("RawFinding", "Security finding as delivered by the loader"),
        // Cards
        ("PolicyCard", "Summary card for one classification in policy mode"),
        ("FindingCard", "Summary card for one classification in finding mode"),
        ("CardDatum", "A card of either mode"),
        ("PolicyTile", "Violation tile of a policy card"),
        ("FindingTile", "Finding or severity tile of a finding card"),
        ("CountTile", "A tile of either mode"),
        ("EntityType", "Entity a tile counts"),
        ("DrillDownTarget", "What a tile click narrows the dashboard to"),
        // View
        ("ViewParams", "Page parameters read from the query string"),
        ("DrillDown", "Filters and query string after a drill-down"),
        ("CardChoiceOptions", "Entries of the card choice dropdown"),
        ("GrcOverview", "Complete overview with header and cards"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "CardChoice" => schema_for!(CardChoice),
        "DisplayMode" => schema_for!(DisplayMode),
        "ActiveFilters" => schema_for!(ActiveFilters),
        "RawPolicy" => schema_for!(RawPolicy),
        "RawFinding" => schema_for!(RawFinding),
        "PolicyCard" => schema_for!(PolicyCard),
        "FindingCard" => schema_for!(FindingCard),
        "CardDatum" => schema_for!(CardDatum),
        "PolicyTile" => schema_for!(PolicyTile),
        "FindingTile" => schema_for!(FindingTile),
        "CountTile" => schema_for!(CountTile),
        "EntityType" => schema_for!(EntityType),
        "DrillDownTarget" => schema_for!(DrillDownTarget),
        "ViewParams" => schema_for!(ViewParams),
        "DrillDown" => schema_for!(DrillDown),
        "CardChoiceOptions" => schema_for!(CardChoiceOptions),
        "GrcOverview" => schema_for!(GrcOverview),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    let mut schemas = BTreeMap::new();
    for (name, _desc) in available_schemas() {
        if let Some(schema) = generate_schema(name) {
            schemas.insert(name.to_string(), schema);
        }
    }
    schemas
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> Result<String, serde_json::Error> {
    match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    }
}
