//! Overview → tile click → filtered overview, end to end.

use grc_common::resource::{CATEGORIES_ANNOTATION, COMPLIANT, NON_COMPLIANT};
use grc_common::{ActiveFilters, CardChoice, GrcItems, RawPolicy};
use grc_config::{MemoryViewStateStore, MessageCatalog, ViewStateStore, POLICY_OVERVIEW_STATE_KEY};
use grc_view::{
    drill_down, select_and_save, toggle_card_collapse, GrcOverview, OverviewBody, OverviewContext,
    OverviewInput, ViewParams,
};

fn items() -> GrcItems {
    GrcItems::Policies(vec![
        RawPolicy::new("limit-memory")
            .with_annotation(CATEGORIES_ANNOTATION, "System And Information Integrity")
            .with_status("local-cluster", NON_COMPLIANT),
        RawPolicy::new("pod-security")
            .with_annotation(CATEGORIES_ANNOTATION, "SystemAndCommunicationsProtections")
            .with_status("local-cluster", COMPLIANT),
    ])
}

#[test]
fn tile_click_narrows_cards_and_collapses() {
    let items = items();
    let context = OverviewContext::new(MessageCatalog::english());
    let filters = ActiveFilters::new();
    let params = ViewParams::parse("");

    let overview = context.build(&OverviewInput {
        items: &items,
        filters: &filters,
        choice: CardChoice::Categories,
        params: &params,
    });
    let cards = overview.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].card.name(), "System And Information Integrity");

    // Click the cluster tile of the violating card
    let target = cards[0].tiles[0]
        .drill_down
        .clone()
        .expect("violated tile is clickable");
    let next = drill_down(&filters, &target, "filters=memory");
    assert_eq!(next.query, "card=false&index=1&toggle=false&filters=memory");

    let next_params = ViewParams::parse(&next.query);
    assert!(!next_params.show_card);
    assert_eq!(next_params.tab_index, 1);
    assert!(!next_params.show_toggle);

    let collapsed = context.build(&OverviewInput {
        items: &items,
        filters: &next.filters,
        choice: CardChoice::Categories,
        params: &next_params,
    });
    assert_eq!(collapsed.body, OverviewBody::Collapsed);

    // Expanding again shows only the drilled-down card
    let expanded_query = toggle_card_collapse(&next.query);
    let expanded_params = ViewParams::parse(&expanded_query);
    assert!(expanded_params.show_card);
    let expanded = GrcOverview::build(
        &OverviewInput {
            items: &items,
            filters: &next.filters,
            choice: CardChoice::Categories,
            params: &expanded_params,
        },
        context.catalog(),
    );
    let names: Vec<&str> = expanded.cards().iter().map(|c| c.card.name()).collect();
    assert_eq!(names, vec!["System And Information Integrity"]);
}

#[test]
fn persisted_choice_drives_header_index() {
    let store = MemoryViewStateStore::new();
    select_and_save(&store, POLICY_OVERVIEW_STATE_KEY, CardChoice::Categories).unwrap();
    let choice = store
        .load(POLICY_OVERVIEW_STATE_KEY)
        .card_choice_or(CardChoice::Standards);

    let items = items();
    let filters = ActiveFilters::new();
    let params = ViewParams::default();
    let overview = GrcOverview::build(
        &OverviewInput {
            items: &items,
            filters: &filters,
            choice,
            params: &params,
        },
        &MessageCatalog::english(),
    );
    assert_eq!(overview.choice, CardChoice::Categories);
    assert_eq!(overview.header.unwrap().selected_index, 0);
}
