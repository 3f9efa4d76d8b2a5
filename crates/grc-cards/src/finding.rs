//! Finding-mode aggregation.
//!
//! Findings are deduplicated by name within a token. When the same name
//! shows up more than once, the severity seen last wins.

use crate::card::{FindingCard, FindingCount, FindingCounts, SeverityCount};
use crate::classify::Classification;
use crate::engine::CardAggregator;
use grc_common::resource::is_high_severity;
use grc_common::{CardChoice, DisplayMode, RawFinding};
use std::collections::BTreeMap;

/// Groups findings into severity cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindingAggregator;

/// Finding name -> last seen severity.
#[derive(Debug, Default)]
pub struct FindingGroup {
    severities: BTreeMap<String, Option<String>>,
}

impl CardAggregator for FindingAggregator {
    type Item = RawFinding;
    type Group = FindingGroup;
    type Card = FindingCard;

    const MODE: DisplayMode = DisplayMode::Finding;

    fn observe(group: &mut FindingGroup, finding: &RawFinding) {
        group
            .severities
            .insert(finding.name.clone(), finding.severity().map(str::to_string));
    }

    fn finalize(
        classification: Classification,
        choice: CardChoice,
        group: FindingGroup,
        item_count: usize,
    ) -> FindingCard {
        let unique = group.severities.len();
        let high = group
            .severities
            .values()
            .filter(|severity| is_high_severity(severity.as_deref()))
            .count();
        FindingCard {
            name: classification.name,
            raw_name: classification.raw_name,
            choice,
            high_severity: high,
            counts: FindingCounts {
                finding: FindingCount {
                    current_findings: unique,
                    total_findings: item_count,
                },
                severity: SeverityCount {
                    high_severity: high,
                    total_severity: unique,
                },
            },
        }
    }
}
