//! Card ordering.
//!
//! Cards sort by their ranking metric descending. Among equal ranks the
//! "Other" bucket goes last and the rest are ordered by display name.

use crate::card::{FindingCard, PolicyCard};
use std::cmp::Ordering;

/// A card that can be placed in the dashboard order.
pub trait RankedCard {
    /// Primary metric, sorted descending.
    fn rank(&self) -> usize;

    /// Display name used for tie-breaks.
    fn display_name(&self) -> &str;
}

impl RankedCard for PolicyCard {
    fn rank(&self) -> usize {
        self.violations
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl RankedCard for FindingCard {
    fn rank(&self) -> usize {
        self.high_severity
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Total order over cards given the localized "Other" label.
pub fn compare_cards<C: RankedCard>(a: &C, b: &C, other: &str) -> Ordering {
    b.rank().cmp(&a.rank()).then_with(|| {
        let (an, bn) = (a.display_name(), b.display_name());
        match (an == other, bn == other) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => an.cmp(bn),
        }
    })
}

/// Sort cards in place. The sort is stable, so cards that compare equal keep
/// their relative order.
pub fn sort_cards<C: RankedCard>(cards: &mut [C], other: &str) {
    cards.sort_by(|a, b| compare_cards(a, b, other));
}
