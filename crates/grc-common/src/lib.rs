//! GRC dashboard common types and errors.
//!
//! This crate provides the value types shared by the card engine, the
//! view-state glue and the CLI host:
//! - Raw policy and finding resources as delivered by the data loader
//! - Card choice (classification kind) and display mode selectors
//! - Active filter state with copy-on-write updates
//! - Output format specifications
//! - Common error types

pub mod error;
pub mod filters;
pub mod items;
pub mod output;
pub mod resource;
pub mod selection;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use filters::ActiveFilters;
pub use items::GrcItems;
pub use output::OutputFormat;
pub use resource::{
    ClusterCompliance, FindingDetail, PolicyMetadata, PolicyRaw, PolicyStatus, RawFinding, RawPolicy,
    SecurityClassification,
};
pub use selection::{CardChoice, DisplayMode};

/// Schema version for JSON payloads emitted by the GRC tools.
pub const SCHEMA_VERSION: &str = "1.0.0";
