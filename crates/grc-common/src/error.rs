//! Error types for the GRC dashboard tools.
//!
//! The card aggregation engine itself never fails: missing fields are
//! defaulted and routed into the "Other" bucket. Errors only arise at the
//! edges, where the host parses selectors, loads item files, reads config,
//! or persists view state.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 20,
//!   "category": "input",
//!   "message": "invalid card choice: 'controls'",
//!   "recoverable": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for GRC operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file errors.
    Config,
    /// Persisted view-state errors.
    ViewState,
    /// Malformed selectors, filters or item payloads.
    Input,
    /// File I/O and serialization errors.
    Io,
    /// Failures producing the command's own output.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::ViewState => write!(f, "view_state"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for the GRC dashboard tools.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid message catalog: {0}")]
    InvalidCatalog(String),

    // Input errors (20-29)
    #[error("invalid card choice: '{0}'")]
    InvalidChoice(String),

    #[error("invalid display mode: '{0}'")]
    InvalidMode(String),

    #[error("invalid filter '{0}': expected <kind>=<value>")]
    InvalidFilter(String),

    #[error("invalid item payload: {0}")]
    InvalidItems(String),

    #[error("unknown schema type: '{0}'")]
    UnknownSchema(String),

    // View-state errors (30-39)
    #[error("view state '{key}' could not be saved: {reason}")]
    ViewStateSave { key: String, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (90-99)
    #[error("could not render {command} output: {reason}")]
    Output { command: String, reason: String },
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: View-state errors
    /// - 60-69: I/O errors
    /// - 90-99: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidCatalog(_) => 11,
            Error::InvalidChoice(_) => 20,
            Error::InvalidMode(_) => 21,
            Error::InvalidFilter(_) => 22,
            Error::InvalidItems(_) => 23,
            Error::UnknownSchema(_) => 24,
            Error::ViewStateSave { .. } => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Output { .. } => 90,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidCatalog(_) => ErrorCategory::Config,
            Error::InvalidChoice(_)
            | Error::InvalidMode(_)
            | Error::InvalidFilter(_)
            | Error::InvalidItems(_)
            | Error::UnknownSchema(_) => ErrorCategory::Input,
            Error::ViewStateSave { .. } => ErrorCategory::ViewState,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::Output { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns whether this error is potentially recoverable by the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::InvalidCatalog(_) => true,
            Error::InvalidChoice(_) | Error::InvalidMode(_) | Error::InvalidFilter(_) => true,
            Error::InvalidItems(_) | Error::UnknownSchema(_) => true,
            // Card rendering continues without persistence
            Error::ViewStateSave { .. } => true,
            Error::Io(_) => true,
            Error::Json(_) => true,
            Error::Output { .. } => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidCatalog(_) => "Invalid Message Catalog",
            Error::InvalidChoice(_) => "Invalid Card Choice",
            Error::InvalidMode(_) => "Invalid Display Mode",
            Error::InvalidFilter(_) => "Invalid Filter",
            Error::InvalidItems(_) => "Invalid Items",
            Error::UnknownSchema(_) => "Unknown Schema",
            Error::ViewStateSave { .. } => "View State Not Saved",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Output { .. } => "Output Failed",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., state key).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = BTreeMap::new();

        match err {
            Error::ViewStateSave { key, .. } => {
                context.insert("key".to_string(), serde_json::json!(key));
            }
            Error::Output { command, .. } => {
                context.insert("command".to_string(), serde_json::json!(command));
            }
            Error::InvalidChoice(value)
            | Error::InvalidMode(value)
            | Error::InvalidFilter(value)
            | Error::UnknownSchema(value) => {
                context.insert("value".to_string(), serde_json::json!(value));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}
