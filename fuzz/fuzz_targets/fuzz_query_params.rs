//! Fuzz target for query-string parsing and the collapse toggle.

#![no_main]

use grc_view::{toggle_card_collapse, QueryParams, ViewParams};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    let _ = ViewParams::parse(query);
    let _ = QueryParams::parse(query).stringify();

    // Toggling twice always lands on an explicit card=true or card=false
    let once = toggle_card_collapse(query);
    let twice = toggle_card_collapse(&once);
    assert_ne!(ViewParams::parse(&once).show_card, ViewParams::parse(&twice).show_card);
});
