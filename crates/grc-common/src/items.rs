//! Item lists handed to the card engine.

use crate::error::{Error, Result};
use crate::resource::{RawFinding, RawPolicy};
use crate::selection::DisplayMode;

/// The items currently on screen, tagged by display mode.
#[derive(Debug, Clone, PartialEq)]
pub enum GrcItems {
    Policies(Vec<RawPolicy>),
    Findings(Vec<RawFinding>),
}

impl GrcItems {
    /// Parse a JSON array of items for the given mode.
    pub fn from_json(mode: DisplayMode, json: &str) -> Result<Self> {
        let items = match mode {
            DisplayMode::Policy => GrcItems::Policies(parse_array(json)?),
            DisplayMode::Finding => GrcItems::Findings(parse_array(json)?),
        };
        Ok(items)
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            GrcItems::Policies(_) => DisplayMode::Policy,
            GrcItems::Findings(_) => DisplayMode::Finding,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GrcItems::Policies(items) => items.len(),
            GrcItems::Findings(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_array<T: serde::de::DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::InvalidItems(
            "expected a JSON array of items".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}
