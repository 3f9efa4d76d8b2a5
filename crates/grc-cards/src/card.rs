//! Card view-models produced by the aggregation engine.
//!
//! Field names serialize in camelCase to match what the card renderer
//! consumes.

use crate::sort::RankedCard;
use grc_common::CardChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Violating and total entities of one dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViolationCount {
    pub violations: usize,
    pub total: usize,
}

/// Policy card counters, by cluster and by policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyCounts {
    pub cluster: ViolationCount,
    pub policy: ViolationCount,
}

/// Summary card for one category or standard in policy mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCard {
    /// Display name.
    pub name: String,
    /// Token as carried by the policies.
    pub raw_name: String,
    /// Classification kind that produced this card.
    pub choice: CardChoice,
    /// Violating policies plus violating clusters. Cards are ranked by this.
    pub violations: usize,
    pub counts: PolicyCounts,
}

/// Findings in this card against all findings on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindingCount {
    pub current_findings: usize,
    pub total_findings: usize,
}

/// High-severity findings in this card against all findings in this card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCount {
    pub high_severity: usize,
    pub total_severity: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FindingCounts {
    pub finding: FindingCount,
    pub severity: SeverityCount,
}

/// Summary card for one category or standard in finding mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindingCard {
    pub name: String,
    pub raw_name: String,
    pub choice: CardChoice,
    /// Unique high-severity findings. Cards are ranked by this.
    pub high_severity: usize,
    pub counts: FindingCounts,
}

/// A card of either mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CardDatum {
    Policy(PolicyCard),
    Finding(FindingCard),
}

impl CardDatum {
    pub fn name(&self) -> &str {
        match self {
            CardDatum::Policy(card) => &card.name,
            CardDatum::Finding(card) => &card.name,
        }
    }

    pub fn raw_name(&self) -> &str {
        match self {
            CardDatum::Policy(card) => &card.raw_name,
            CardDatum::Finding(card) => &card.raw_name,
        }
    }

    pub fn choice(&self) -> CardChoice {
        match self {
            CardDatum::Policy(card) => card.choice,
            CardDatum::Finding(card) => card.choice,
        }
    }

    /// The ranking metric: violations for policies, high severity for findings.
    pub fn rank(&self) -> usize {
        match self {
            CardDatum::Policy(card) => card.rank(),
            CardDatum::Finding(card) => card.rank(),
        }
    }
}

impl From<PolicyCard> for CardDatum {
    fn from(card: PolicyCard) -> Self {
        CardDatum::Policy(card)
    }
}

impl From<FindingCard> for CardDatum {
    fn from(card: FindingCard) -> Self {
        CardDatum::Finding(card)
    }
}
