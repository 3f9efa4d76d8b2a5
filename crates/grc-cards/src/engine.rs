//! Shared aggregation driver.
//!
//! Policy and finding cards share one pipeline: extract, filter, group by
//! raw token, finalize each group, sort. The mode-specific parts (what a
//! group remembers about an item and how it becomes a card) live behind
//! [`CardAggregator`].

use crate::card::{CardDatum, FindingCard, PolicyCard};
use crate::classify::{extract, Classification, Classified};
use crate::finding::FindingAggregator;
use crate::policy::PolicyAggregator;
use crate::sort::{sort_cards, RankedCard};
use grc_common::{ActiveFilters, CardChoice, DisplayMode, GrcItems, RawFinding, RawPolicy};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Inputs that shape one card computation besides the items themselves.
#[derive(Debug, Clone, Copy)]
pub struct CardRequest<'a> {
    /// Classification kind to group by.
    pub choice: CardChoice,
    /// Active filters from the filter bar.
    pub filters: Option<&'a ActiveFilters>,
    /// Localized label of the "Other" bucket.
    pub other_label: &'a str,
}

impl<'a> CardRequest<'a> {
    pub fn new(choice: CardChoice, other_label: &'a str) -> Self {
        CardRequest {
            choice,
            filters: None,
            other_label,
        }
    }

    pub fn with_filters(mut self, filters: &'a ActiveFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Whether a display name passes the active filter for this kind.
    pub fn admits(&self, name: &str) -> bool {
        self.filters
            .map_or(true, |filters| filters.admits(self.choice, name))
    }
}

/// Mode-specific half of the aggregation pipeline.
pub trait CardAggregator {
    /// Raw resource type.
    type Item: Classified;
    /// Per-token accumulator, created empty on first sight of a token.
    type Group: Default;
    /// Finished card.
    type Card: RankedCard;

    const MODE: DisplayMode;

    /// Fold one item into the group of a token it carries.
    fn observe(group: &mut Self::Group, item: &Self::Item);

    /// Turn a finished group into a card. `item_count` is the size of the
    /// whole input list, before grouping and filtering.
    fn finalize(
        classification: Classification,
        choice: CardChoice,
        group: Self::Group,
        item_count: usize,
    ) -> Self::Card;
}

/// Run the pipeline for one aggregator.
pub fn aggregate<A: CardAggregator>(items: &[A::Item], request: &CardRequest<'_>) -> Vec<A::Card> {
    let mut groups: BTreeMap<String, (Classification, A::Group)> = BTreeMap::new();

    for item in items {
        for classification in extract(item, request.choice, request.other_label) {
            if !request.admits(&classification.name) {
                trace!(name = %classification.name, "filtered out");
                continue;
            }
            let (_, group) = groups
                .entry(classification.raw_name.clone())
                .or_insert_with(|| (classification, A::Group::default()));
            A::observe(group, item);
        }
    }

    let mut cards: Vec<A::Card> = groups
        .into_values()
        .map(|(classification, group)| {
            A::finalize(classification, request.choice, group, items.len())
        })
        .collect();
    sort_cards(&mut cards, request.other_label);

    let mode = A::MODE;
    debug!(
        mode = %mode,
        choice = %request.choice,
        items = items.len(),
        cards = cards.len(),
        "aggregated cards"
    );
    cards
}

/// Cards for a list of policies.
pub fn policy_cards(policies: &[RawPolicy], request: &CardRequest<'_>) -> Vec<PolicyCard> {
    aggregate::<PolicyAggregator>(policies, request)
}

/// Cards for a list of findings.
pub fn finding_cards(findings: &[RawFinding], request: &CardRequest<'_>) -> Vec<FindingCard> {
    aggregate::<FindingAggregator>(findings, request)
}

/// Cards for whatever the dashboard is showing.
pub fn card_data(items: &GrcItems, request: &CardRequest<'_>) -> Vec<CardDatum> {
    match items {
        GrcItems::Policies(policies) => policy_cards(policies, request)
            .into_iter()
            .map(CardDatum::from)
            .collect(),
        GrcItems::Findings(findings) => finding_cards(findings, request)
            .into_iter()
            .map(CardDatum::from)
            .collect(),
    }
}
