//! Fuzz target for policy payload parsing and card aggregation.
//!
//! Whatever parses as a policy list must aggregate without panicking, for
//! both classification kinds.

#![no_main]

use grc_cards::{policy_cards, CardRequest};
use grc_common::{CardChoice, RawPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(policies) = serde_json::from_slice::<Vec<RawPolicy>>(data) else {
        return;
    };
    for &choice in CardChoice::all() {
        let cards = policy_cards(&policies, &CardRequest::new(choice, "Other"));
        for card in &cards {
            assert!(card.counts.policy.violations <= card.counts.policy.total);
            assert!(card.counts.cluster.violations <= card.counts.cluster.total);
        }
    }
});
