//! Policy-mode aggregation.
//!
//! Within one token, a policy counts as violating when any cluster reports
//! it non-compliant, and a cluster counts as violating when it is
//! non-compliant for any policy carrying the token. The card's `violations`
//! is the sum of both tallies.

use crate::card::{PolicyCard, PolicyCounts, ViolationCount};
use crate::classify::Classification;
use crate::engine::CardAggregator;
use grc_common::{CardChoice, DisplayMode, RawPolicy};
use std::collections::BTreeMap;

/// Groups policies into violation cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyAggregator;

/// Per-token flags, OR-ed over every status entry seen.
#[derive(Debug, Default)]
pub struct PolicyGroup {
    /// Policy name -> non-compliant on some cluster.
    policies: BTreeMap<String, bool>,
    /// Cluster name -> non-compliant for some policy.
    clusters: BTreeMap<String, bool>,
}

impl CardAggregator for PolicyAggregator {
    type Item = RawPolicy;
    type Group = PolicyGroup;
    type Card = PolicyCard;

    const MODE: DisplayMode = DisplayMode::Policy;

    fn observe(group: &mut PolicyGroup, policy: &RawPolicy) {
        // A policy with no status entries creates the card but is not counted.
        for (cluster, non_compliant) in policy.cluster_statuses() {
            *group
                .policies
                .entry(policy.name().to_string())
                .or_insert(false) |= non_compliant;
            *group.clusters.entry(cluster.to_string()).or_insert(false) |= non_compliant;
        }
    }

    fn finalize(
        classification: Classification,
        choice: CardChoice,
        group: PolicyGroup,
        _item_count: usize,
    ) -> PolicyCard {
        let policy = tally(&group.policies);
        let cluster = tally(&group.clusters);
        PolicyCard {
            name: classification.name,
            raw_name: classification.raw_name,
            choice,
            violations: policy.violations + cluster.violations,
            counts: PolicyCounts { cluster, policy },
        }
    }
}

fn tally(flags: &BTreeMap<String, bool>) -> ViolationCount {
    ViolationCount {
        violations: flags.values().filter(|violating| **violating).count(),
        total: flags.len(),
    }
}
