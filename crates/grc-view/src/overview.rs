//! Overview view model: header, cards with their tiles, or the empty state.

use crate::choices::CardChoiceOptions;
use crate::query::ViewParams;
use grc_cards::{
    card_data, finding_tiles, policy_tiles, CardDatum, CardRequest, CountTile, DrillDownTarget,
};
use grc_common::{ActiveFilters, CardChoice, DisplayMode, GrcItems};
use grc_config::messages::keys;
use grc_config::MessageCatalog;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

/// Everything one overview render depends on.
#[derive(Debug, Clone, Copy)]
pub struct OverviewInput<'a> {
    pub items: &'a GrcItems,
    pub filters: &'a ActiveFilters,
    pub choice: CardChoice,
    pub params: &'a ViewParams,
}

/// Header above the cards. Title and dropdown only show while expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<CardChoiceOptions>,
    pub selected_index: usize,
    pub collapsed: bool,
    pub collapse_hint: String,
    pub collapse_button: String,
}

/// A tile with its localized captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    #[serde(flatten)]
    pub tile: CountTile,
    pub label: String,
    pub empty_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drill_down: Option<DrillDownTarget>,
}

/// A card with its tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CardView {
    #[serde(flatten)]
    pub card: CardDatum,
    pub tiles: Vec<TileView>,
}

/// Shown instead of the overview when there is nothing to summarize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NoResource {
    pub title: String,
    pub detail: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverviewBody {
    NoResource(NoResource),
    Collapsed,
    Cards { cards: Vec<CardView> },
}

/// The rendered overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrcOverview {
    pub mode: DisplayMode,
    pub choice: CardChoice,
    pub params: ViewParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<OverviewHeader>,
    pub body: OverviewBody,
}

impl GrcOverview {
    /// Build an overview with a one-off context.
    pub fn build(input: &OverviewInput<'_>, catalog: &MessageCatalog) -> Self {
        OverviewContext::new(catalog.clone()).build(input)
    }

    /// Cards in display order; empty unless the body shows cards.
    pub fn cards(&self) -> &[CardView] {
        match &self.body {
            OverviewBody::Cards { cards } => cards,
            _ => &[],
        }
    }
}

/// Catalog plus the labels derived from it, reused across renders.
#[derive(Debug)]
pub struct OverviewContext {
    catalog: MessageCatalog,
    choices: OnceLock<CardChoiceOptions>,
}

impl OverviewContext {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self {
            catalog,
            choices: OnceLock::new(),
        }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Dropdown entries, built on first use.
    pub fn choices(&self) -> &CardChoiceOptions {
        self.choices
            .get_or_init(|| CardChoiceOptions::new(&self.catalog))
    }

    pub fn build(&self, input: &OverviewInput<'_>) -> GrcOverview {
        let mode = input.items.mode();
        let (header, body) = if input.items.is_empty() {
            (None, OverviewBody::NoResource(self.no_resource()))
        } else if input.params.show_card {
            (
                Some(self.header(input.choice, true)),
                OverviewBody::Cards {
                    cards: self.cards(input),
                },
            )
        } else {
            (Some(self.header(input.choice, false)), OverviewBody::Collapsed)
        };

        debug!(
            mode = %mode,
            choice = %input.choice,
            items = input.items.len(),
            show_card = input.params.show_card,
            "overview built"
        );

        GrcOverview {
            mode,
            choice: input.choice,
            params: input.params.clone(),
            header,
            body,
        }
    }

    fn header(&self, choice: CardChoice, show_card: bool) -> OverviewHeader {
        let (hint, button) = if show_card {
            (keys::COLLAPSE_HINT_COLLAPSE, keys::COLLAPSE_BUTTON_COLLAPSE)
        } else {
            (keys::COLLAPSE_HINT_EXPAND, keys::COLLAPSE_BUTTON_EXPAND)
        };
        let choices = self.choices();
        OverviewHeader {
            title: show_card.then(|| self.catalog.get(keys::OVERVIEW_TITLE)),
            choices: show_card.then(|| choices.clone()),
            selected_index: choices.selected_index(choice),
            collapsed: !show_card,
            collapse_hint: self.catalog.get(hint),
            collapse_button: self.catalog.get(button),
        }
    }

    fn cards(&self, input: &OverviewInput<'_>) -> Vec<CardView> {
        let other = self.catalog.other_label();
        let request = CardRequest::new(input.choice, &other).with_filters(input.filters);
        card_data(input.items, &request)
            .into_iter()
            .map(|card| {
                let tiles = tiles_of(&card)
                    .into_iter()
                    .map(|tile| self.tile_view(tile))
                    .collect();
                CardView { card, tiles }
            })
            .collect()
    }

    fn tile_view(&self, tile: CountTile) -> TileView {
        TileView {
            label: self.catalog.get(&tile.label_key()),
            empty_label: self.catalog.get(&tile.empty_label_key()),
            drill_down: tile.drill_down(),
            tile,
        }
    }

    fn no_resource(&self) -> NoResource {
        let routes = self.catalog.get(keys::ROUTES_GRC);
        NoResource {
            title: self.catalog.format(keys::NO_RESOURCE_TITLE, &[&routes]),
            detail: self.catalog.get(keys::NO_RESOURCE_DETAIL_POLICY),
            action: self.catalog.get(keys::ROUTES_CREATE_POLICY),
        }
    }
}

fn tiles_of(card: &CardDatum) -> Vec<CountTile> {
    match card {
        CardDatum::Policy(card) => policy_tiles(card).into_iter().map(CountTile::Policy).collect(),
        CardDatum::Finding(card) => finding_tiles(card)
            .into_iter()
            .map(CountTile::Finding)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_cards::EntityType;
    use grc_common::resource::{COMPLIANT, NON_COMPLIANT, STANDARDS_ANNOTATION};
    use grc_common::{RawFinding, RawPolicy};

    fn policies() -> GrcItems {
        GrcItems::Policies(vec![
            RawPolicy::new("P1")
                .with_annotation(STANDARDS_ANNOTATION, "PCI")
                .with_status("C1", NON_COMPLIANT),
            RawPolicy::new("P2")
                .with_annotation(STANDARDS_ANNOTATION, "PCI,HIPAA")
                .with_status("C1", COMPLIANT),
        ])
    }

    fn build(items: &GrcItems, query: &str) -> GrcOverview {
        let filters = ActiveFilters::new();
        let params = ViewParams::parse(query);
        let input = OverviewInput {
            items,
            filters: &filters,
            choice: CardChoice::Standards,
            params: &params,
        };
        GrcOverview::build(&input, &MessageCatalog::english())
    }

    #[test]
    fn test_expanded_overview() {
        let overview = build(&policies(), "");
        let header = overview.header.as_ref().unwrap();
        assert_eq!(header.title.as_deref(), Some("Summary"));
        assert_eq!(header.selected_index, 1);
        assert_eq!(header.collapse_button, "Collapse");
        assert!(!header.collapsed);

        let cards = overview.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].card.name(), "PCI");
        assert_eq!(cards[0].tiles[0].label, "Cluster violations");
        assert_eq!(cards[0].tiles[0].tile.entity(), EntityType::Cluster);
        assert!(cards[0].tiles[0].drill_down.is_some());
        assert_eq!(cards[1].tiles[1].empty_label, "No policy violations");
        assert!(cards[1].tiles[1].drill_down.is_none());
    }

    #[test]
    fn test_collapsed_overview_has_no_cards() {
        let overview = build(&policies(), "card=false");
        let header = overview.header.as_ref().unwrap();
        assert!(header.title.is_none());
        assert!(header.choices.is_none());
        assert_eq!(header.collapse_hint, "Expand summary cards");
        assert_eq!(overview.body, OverviewBody::Collapsed);
        assert!(overview.cards().is_empty());
    }

    #[test]
    fn test_empty_items_show_no_resource() {
        let overview = build(&GrcItems::Findings(Vec::new()), "");
        assert!(overview.header.is_none());
        match &overview.body {
            OverviewBody::NoResource(empty) => {
                assert_eq!(empty.title, "No Governance and risk yet");
                assert_eq!(empty.action, "Create policy");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_finding_cards_and_json_shape() {
        let items = GrcItems::Findings(vec![RawFinding::new("F1")
            .with_standards(["PCI"])
            .with_severity("High")]);
        let overview = build(&items, "");
        assert_eq!(overview.mode, DisplayMode::Finding);

        let json = serde_json::to_value(&overview).unwrap();
        assert_eq!(json["body"]["state"], "cards");
        let card = &json["body"]["cards"][0];
        assert_eq!(card["name"], "PCI");
        assert_eq!(card["highSeverity"], 1);
        assert_eq!(card["tiles"][0]["label"], "Findings");
        assert_eq!(card["tiles"][0]["drillDown"]["entity"], "finding");
        assert_eq!(card["tiles"][1]["label"], "High severity");
        assert!(card["tiles"][1].get("drillDown").is_none());
    }

    #[test]
    fn test_context_reuses_choices() {
        let context = OverviewContext::new(MessageCatalog::english());
        let first: *const CardChoiceOptions = context.choices();
        let second: *const CardChoiceOptions = context.choices();
        assert_eq!(first, second);
    }
}
