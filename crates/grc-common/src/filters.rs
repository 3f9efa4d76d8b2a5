//! Active filter state shared with the resource filter bar.
//!
//! Filters map a filter kind (`categories`, `standards`, or any other kind
//! the filter bar tracks) to the set of display values the user selected.
//! Values are immutable once built: updates return a new state.

use crate::error::{Error, Result};
use crate::selection::CardChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Selected filter values keyed by filter kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ActiveFilters {
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected values for a kind, if the kind has been touched.
    pub fn get(&self, kind: &str) -> Option<&BTreeSet<String>> {
        self.sets.get(kind)
    }

    /// Selected values for a card choice.
    pub fn for_choice(&self, choice: CardChoice) -> Option<&BTreeSet<String>> {
        self.get(choice.as_str())
    }

    /// Whether a card with display name `name` survives the filter for `choice`.
    ///
    /// A card is excluded only when the set for its kind exists, is non-empty,
    /// and does not contain the exact display name.
    pub fn admits(&self, choice: CardChoice, name: &str) -> bool {
        match self.for_choice(choice) {
            Some(selected) if !selected.is_empty() => selected.contains(name),
            _ => true,
        }
    }

    /// Return a new state with `value` added to the set for `kind`.
    pub fn with_value(&self, kind: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.sets
            .entry(kind.to_string())
            .or_default()
            .insert(value.into());
        next
    }

    /// Iterate `(kind, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when no kind has any selected value.
    pub fn is_empty(&self) -> bool {
        self.sets.values().all(BTreeSet::is_empty)
    }

    /// Parse a `kind=value` filter argument and add it.
    pub fn with_spec(&self, spec: &str) -> Result<Self> {
        let (kind, value) = spec
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .ok_or_else(|| Error::InvalidFilter(spec.to_string()))?;
        Ok(self.with_value(kind, value))
    }
}

impl FromIterator<(String, String)> for ActiveFilters {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut sets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (kind, value) in iter {
            sets.entry(kind).or_default().insert(value);
        }
        ActiveFilters { sets }
    }
}
