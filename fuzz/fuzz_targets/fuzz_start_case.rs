//! Fuzz target for display-name start casing.

#![no_main]

use grc_cards::start_case;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let cased = start_case(name);
        // Words are joined by exactly one space
        assert!(!cased.starts_with(' ') && !cased.ends_with(' '));
        assert!(!cased.contains("  "));
    }
});
