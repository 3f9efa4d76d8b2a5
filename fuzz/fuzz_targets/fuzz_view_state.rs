//! Fuzz target for persisted view-state parsing.
//!
//! View-state blobs are written by other tools too; any JSON object must
//! load, and unknown fields must survive a save.

#![no_main]

use grc_common::CardChoice;
use grc_config::ViewState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(state) = serde_json::from_slice::<ViewState>(data) else {
        return;
    };
    let next = state.with_card_choice(CardChoice::Categories);
    assert_eq!(next.extra, state.extra);
    let _ = serde_json::to_vec(&next);
});
