//! Card choice and display mode selectors.
//!
//! The card choice picks the classification kind cards are grouped by; the
//! display mode picks whether the items on screen are policies or findings.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification kind used to group items into cards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CardChoice {
    /// Group by security category (e.g. `SystemAndCommunicationsProtections`).
    Categories,
    /// Group by compliance standard (e.g. `NIST-CSF`, `PCI`).
    #[default]
    Standards,
}

impl CardChoice {
    /// All choices in the order they are offered to the user.
    pub fn all() -> &'static [CardChoice] {
        &[CardChoice::Categories, CardChoice::Standards]
    }

    /// Stable lowercase name, also the key in the active-filter map.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardChoice::Categories => "categories",
            CardChoice::Standards => "standards",
        }
    }

    /// Whether card names for this kind are start-cased for display.
    pub fn start_cases_names(&self) -> bool {
        matches!(self, CardChoice::Categories)
    }
}

impl std::fmt::Display for CardChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "categories" | "category" => Ok(CardChoice::Categories),
            "standards" | "standard" => Ok(CardChoice::Standards),
            _ => Err(Error::InvalidChoice(s.to_string())),
        }
    }
}

/// Which kind of GRC item the dashboard is showing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Policies, counted by violations.
    #[default]
    Policy,
    /// Security findings, counted by severity.
    Finding,
}

impl DisplayMode {
    /// Derive the mode from the route path: a trailing `findings` segment
    /// selects findings, anything else (including `all`) selects policies.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/').rsplit('/').next() {
            Some("findings") => DisplayMode::Finding,
            _ => DisplayMode::Policy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Policy => "policy",
            DisplayMode::Finding => "finding",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "policy" | "policies" | "all" => Ok(DisplayMode::Policy),
            "finding" | "findings" => Ok(DisplayMode::Finding),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}
