//! Count tiles shown inside a card, and the drill-down each tile offers.
//!
//! A policy card shows a cluster tile and a policy tile; a finding card
//! shows a finding tile and a severity tile. Clicking a tile that has
//! something to show narrows the dashboard to that card's classification.

use crate::card::{FindingCard, FindingCount, PolicyCard, SeverityCount};
use grc_common::CardChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The entity a tile counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Cluster,
    Policy,
    Finding,
    Severity,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Cluster => "cluster",
            EntityType::Policy => "policy",
            EntityType::Finding => "finding",
            EntityType::Severity => "severity",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the host needs to narrow the dashboard after a tile click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrillDownTarget {
    /// Filter kind to add to.
    pub kind: CardChoice,
    /// Card display name that was clicked.
    pub display_name: String,
    /// Tile that was clicked.
    pub entity: EntityType,
}

/// Violation tile of a policy card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTile {
    pub entity: EntityType,
    pub kind: CardChoice,
    pub card_name: String,
    pub violations: usize,
    pub total: usize,
    pub violated: bool,
}

/// Tile of a finding card. The finding tile carries finding counts only
/// and the severity tile severity counts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindingTile {
    pub entity: EntityType,
    pub kind: CardChoice,
    pub card_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<FindingCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityCount>,
    pub found: bool,
    pub high: bool,
}

/// A tile of either mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CountTile {
    Policy(PolicyTile),
    Finding(FindingTile),
}

impl PolicyTile {
    /// Message key of the tile caption.
    pub fn label_key(&self) -> String {
        format!("overview.{}.violations", self.entity)
    }

    /// Message key shown when there is nothing to count.
    pub fn empty_label_key(&self) -> String {
        format!("overview.{}.violations.empty", self.entity)
    }

    /// The drill-down for a click; only tiles with violations respond.
    pub fn drill_down(&self) -> Option<DrillDownTarget> {
        self.violated.then(|| DrillDownTarget {
            kind: self.kind,
            display_name: self.card_name.clone(),
            entity: self.entity,
        })
    }
}

impl FindingTile {
    pub fn label_key(&self) -> String {
        format!("overview.{}.findingCluster", self.entity)
    }

    pub fn empty_label_key(&self) -> String {
        format!("overview.{}.findingCluster.empty", self.entity)
    }

    /// The drill-down for a click; only tiles with findings respond.
    pub fn drill_down(&self) -> Option<DrillDownTarget> {
        self.found.then(|| DrillDownTarget {
            kind: self.kind,
            display_name: self.card_name.clone(),
            entity: self.entity,
        })
    }

    /// Neither findings nor high severity: render the empty state.
    pub fn is_empty(&self) -> bool {
        !self.found && !self.high
    }
}

impl CountTile {
    pub fn entity(&self) -> EntityType {
        match self {
            CountTile::Policy(tile) => tile.entity,
            CountTile::Finding(tile) => tile.entity,
        }
    }

    pub fn label_key(&self) -> String {
        match self {
            CountTile::Policy(tile) => tile.label_key(),
            CountTile::Finding(tile) => tile.label_key(),
        }
    }

    pub fn empty_label_key(&self) -> String {
        match self {
            CountTile::Policy(tile) => tile.empty_label_key(),
            CountTile::Finding(tile) => tile.empty_label_key(),
        }
    }

    pub fn drill_down(&self) -> Option<DrillDownTarget> {
        match self {
            CountTile::Policy(tile) => tile.drill_down(),
            CountTile::Finding(tile) => tile.drill_down(),
        }
    }
}

/// Tiles of a policy card: cluster first, then policy.
pub fn policy_tiles(card: &PolicyCard) -> Vec<PolicyTile> {
    [
        (EntityType::Cluster, card.counts.cluster),
        (EntityType::Policy, card.counts.policy),
    ]
    .into_iter()
    .map(|(entity, count)| PolicyTile {
        entity,
        kind: card.choice,
        card_name: card.name.clone(),
        violations: count.violations,
        total: count.total,
        violated: count.violations > 0,
    })
    .collect()
}

/// Tiles of a finding card: finding first, then severity.
pub fn finding_tiles(card: &FindingCard) -> Vec<FindingTile> {
    let finding = card.counts.finding;
    let severity = card.counts.severity;
    vec![
        FindingTile {
            entity: EntityType::Finding,
            kind: card.choice,
            card_name: card.name.clone(),
            findings: Some(finding),
            severity: None,
            found: finding.current_findings > 0,
            high: false,
        },
        FindingTile {
            entity: EntityType::Severity,
            kind: card.choice,
            card_name: card.name.clone(),
            findings: None,
            severity: Some(severity),
            found: false,
            high: severity.high_severity > 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{FindingCounts, PolicyCounts, ViolationCount};

    fn policy_card(cluster: ViolationCount, policy: ViolationCount) -> PolicyCard {
        PolicyCard {
            name: "Access Control".into(),
            raw_name: "access-control".into(),
            choice: CardChoice::Categories,
            violations: cluster.violations + policy.violations,
            counts: PolicyCounts { cluster, policy },
        }
    }

    #[test]
    fn test_policy_tiles_order_and_labels() {
        let card = policy_card(
            ViolationCount {
                violations: 1,
                total: 3,
            },
            ViolationCount {
                violations: 0,
                total: 2,
            },
        );
        let tiles = policy_tiles(&card);
        assert_eq!(tiles[0].entity, EntityType::Cluster);
        assert_eq!(tiles[0].label_key(), "overview.cluster.violations");
        assert_eq!(tiles[1].empty_label_key(), "overview.policy.violations.empty");
        assert!(tiles[0].violated);
        assert!(!tiles[1].violated);
    }

    #[test]
    fn test_policy_drill_down_only_when_violated() {
        let card = policy_card(
            ViolationCount {
                violations: 2,
                total: 2,
            },
            ViolationCount::default(),
        );
        let tiles = policy_tiles(&card);
        assert_eq!(
            tiles[0].drill_down(),
            Some(DrillDownTarget {
                kind: CardChoice::Categories,
                display_name: "Access Control".into(),
                entity: EntityType::Cluster,
            })
        );
        assert_eq!(tiles[1].drill_down(), None);
    }

    #[test]
    fn test_finding_tiles_split_counts() {
        let card = FindingCard {
            name: "PCI".into(),
            raw_name: "PCI".into(),
            choice: CardChoice::Standards,
            high_severity: 1,
            counts: FindingCounts {
                finding: FindingCount {
                    current_findings: 2,
                    total_findings: 5,
                },
                severity: SeverityCount {
                    high_severity: 1,
                    total_severity: 2,
                },
            },
        };
        let tiles = finding_tiles(&card);
        assert!(tiles[0].found && !tiles[0].high);
        assert!(!tiles[1].found && tiles[1].high);
        assert_eq!(tiles[1].label_key(), "overview.severity.findingCluster");

        // Only the finding tile responds to clicks
        assert_eq!(
            tiles[0].drill_down().map(|t| t.entity),
            Some(EntityType::Finding)
        );
        assert_eq!(tiles[1].drill_down(), None);
    }

    #[test]
    fn test_finding_tile_empty_state() {
        let card = FindingCard {
            name: "Other".into(),
            raw_name: "Other".into(),
            choice: CardChoice::Standards,
            high_severity: 0,
            counts: FindingCounts::default(),
        };
        assert!(finding_tiles(&card).iter().all(FindingTile::is_empty));
    }

    #[test]
    fn test_count_tile_dispatch() {
        let card = policy_card(ViolationCount::default(), ViolationCount::default());
        let tile = CountTile::Policy(policy_tiles(&card).remove(1));
        assert_eq!(tile.entity(), EntityType::Policy);
        assert_eq!(tile.label_key(), "overview.policy.violations");
        assert_eq!(tile.drill_down(), None);
    }
}
