//! Fuzz target for finding cards built from arbitrary findings.

#![no_main]

use arbitrary::Arbitrary;
use grc_cards::{finding_cards, CardRequest};
use grc_common::{ActiveFilters, CardChoice, RawFinding};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Finding {
    name: String,
    categories: Option<Vec<String>>,
    standards: Option<Vec<String>>,
    severity: Option<String>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    findings: Vec<Finding>,
    categories: bool,
    filter: Option<String>,
}

fuzz_target!(|input: Input| {
    let findings: Vec<RawFinding> = input
        .findings
        .into_iter()
        .map(|f| {
            let mut finding = RawFinding::new(f.name);
            if let Some(categories) = f.categories {
                finding = finding.with_categories(categories);
            }
            if let Some(standards) = f.standards {
                finding = finding.with_standards(standards);
            }
            if let Some(severity) = f.severity {
                finding = finding.with_severity(severity);
            }
            finding
        })
        .collect();

    let choice = if input.categories {
        CardChoice::Categories
    } else {
        CardChoice::Standards
    };
    let filters = match input.filter {
        Some(value) => ActiveFilters::new().with_value(choice.as_str(), value),
        None => ActiveFilters::new(),
    };
    let request = CardRequest::new(choice, "Other").with_filters(&filters);
    for card in finding_cards(&findings, &request) {
        assert!(card.counts.severity.high_severity <= card.counts.severity.total_severity);
        assert_eq!(card.counts.finding.total_findings, findings.len());
    }
});
