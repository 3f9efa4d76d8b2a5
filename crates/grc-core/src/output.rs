//! Response envelopes and error reporting.

use grc_common::{Error, Result, StructuredError, SCHEMA_VERSION};
use serde::Serialize;
use serde_json::Value;

/// Common header of every JSON payload.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub schema_version: &'static str,
    pub run_id: &'a str,
    pub generated_at: String,
    pub command: &'a str,
    #[serde(flatten)]
    pub payload: T,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    pub fn new(run_id: &'a str, command: &'a str, payload: T) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            run_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            command,
            payload,
        }
    }

    /// Pretty JSON; a payload that cannot be serialized is an internal error.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::Output {
            command: self.command.to_string(),
            reason: err.to_string(),
        })
    }
}

/// One-line report for the markdown and summary formats.
pub fn error_line(error: &Error) -> String {
    format!("{}: {}", error.headline(), error)
}

/// JSON body reported on stderr when a command fails.
pub fn error_response(run_id: &str, command: &str, error: &Error) -> Value {
    serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "run_id": run_id,
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "command": command,
        "status": "error",
        "error": StructuredError::from(error),
    })
}
