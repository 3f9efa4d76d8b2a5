//! Summary card aggregation for the GRC dashboard.
//!
//! Turns a list of raw policies or findings plus the user's active filters
//! into sorted, counted card view-models grouped by category or standard.
//!
//! # Pipeline
//!
//! 1. **Extraction**: pull the classification tokens for the chosen kind
//!    (comma-delimited annotation for policies, tag list for findings);
//!    items without any fall into the "Other" bucket.
//! 2. **Filtering**: drop tokens whose display name is not in a non-empty
//!    active-filter set for that kind.
//! 3. **Aggregation**: group surviving items per token, deduplicated by
//!    policy, cluster or finding name.
//! 4. **Sorting**: rank descending, "Other" last on ties, then by name.
//!
//! Every call is pure: the same inputs always produce the same cards in the
//! same order.
//!
//! # Example
//!
//! ```
//! use grc_cards::{policy_cards, CardRequest};
//! use grc_common::resource::{NON_COMPLIANT, STANDARDS_ANNOTATION};
//! use grc_common::{ActiveFilters, CardChoice, RawPolicy};
//!
//! let policies = vec![RawPolicy::new("p1")
//!     .with_annotation(STANDARDS_ANNOTATION, "PCI")
//!     .with_status("cluster1", NON_COMPLIANT)];
//! let filters = ActiveFilters::new();
//! let request = CardRequest::new(CardChoice::Standards, "Other").with_filters(&filters);
//!
//! let cards = policy_cards(&policies, &request);
//! assert_eq!(cards[0].name, "PCI");
//! assert_eq!(cards[0].violations, 2);
//! ```

pub mod card;
pub mod classify;
pub mod engine;
pub mod finding;
pub mod policy;
pub mod sort;
pub mod start_case;
pub mod tiles;

pub use card::{
    CardDatum, FindingCard, FindingCount, FindingCounts, PolicyCard, PolicyCounts, SeverityCount,
    ViolationCount,
};
pub use classify::{extract, Classification, Classified};
pub use engine::{aggregate, card_data, finding_cards, policy_cards, CardAggregator, CardRequest};
pub use finding::FindingAggregator;
pub use policy::PolicyAggregator;
pub use sort::{compare_cards, sort_cards, RankedCard};
pub use start_case::start_case;
pub use tiles::{
    finding_tiles, policy_tiles, CountTile, DrillDownTarget, EntityType, FindingTile, PolicyTile,
};
