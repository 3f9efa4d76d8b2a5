//! Localized message catalog.
//!
//! Every label the cards show (titles, tile captions, the "Other" bucket)
//! is looked up here by key. The built-in catalog is English; a config
//! file can override individual keys for another locale.

use std::collections::BTreeMap;

/// Message keys used by the overview.
pub mod keys {
    pub const OVERVIEW_TITLE: &str = "overview.grc.overview.title";
    pub const OTHER: &str = "overview.grc.overview.other";
    pub const CARDS_CATEGORIES: &str = "overview.grc.cards.categories";
    pub const CARDS_STANDARDS: &str = "overview.grc.cards.standards";
    pub const COLLAPSE_HINT_COLLAPSE: &str = "overview.grc.cards.collapseHint.collapse";
    pub const COLLAPSE_HINT_EXPAND: &str = "overview.grc.cards.collapseHint.expand";
    pub const COLLAPSE_BUTTON_COLLAPSE: &str = "overview.grc.cards.collapseButton.collapse";
    pub const COLLAPSE_BUTTON_EXPAND: &str = "overview.grc.cards.collapseButton.expand";
    pub const CLUSTER_VIOLATIONS: &str = "overview.cluster.violations";
    pub const CLUSTER_VIOLATIONS_EMPTY: &str = "overview.cluster.violations.empty";
    pub const POLICY_VIOLATIONS: &str = "overview.policy.violations";
    pub const POLICY_VIOLATIONS_EMPTY: &str = "overview.policy.violations.empty";
    pub const FINDING_FINDINGS: &str = "overview.finding.findingCluster";
    pub const FINDING_FINDINGS_EMPTY: &str = "overview.finding.findingCluster.empty";
    pub const SEVERITY_FINDINGS: &str = "overview.severity.findingCluster";
    pub const SEVERITY_FINDINGS_EMPTY: &str = "overview.severity.findingCluster.empty";
    pub const NO_RESOURCE_TITLE: &str = "no-resource.title";
    pub const NO_RESOURCE_DETAIL_POLICY: &str = "no-resource.detail.policy";
    pub const ROUTES_GRC: &str = "routes.grc";
    pub const ROUTES_CREATE_POLICY: &str = "routes.create.policy";
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::OVERVIEW_TITLE, "Summary"),
    (keys::OTHER, "Other"),
    (keys::CARDS_CATEGORIES, "Categories"),
    (keys::CARDS_STANDARDS, "Standards"),
    (keys::COLLAPSE_HINT_COLLAPSE, "Collapse summary cards"),
    (keys::COLLAPSE_HINT_EXPAND, "Expand summary cards"),
    (keys::COLLAPSE_BUTTON_COLLAPSE, "Collapse"),
    (keys::COLLAPSE_BUTTON_EXPAND, "Expand"),
    (keys::CLUSTER_VIOLATIONS, "Cluster violations"),
    (keys::CLUSTER_VIOLATIONS_EMPTY, "No cluster violations"),
    (keys::POLICY_VIOLATIONS, "Policy violations"),
    (keys::POLICY_VIOLATIONS_EMPTY, "No policy violations"),
    (keys::FINDING_FINDINGS, "Findings"),
    (keys::FINDING_FINDINGS_EMPTY, "No findings"),
    (keys::SEVERITY_FINDINGS, "High severity"),
    (keys::SEVERITY_FINDINGS_EMPTY, "No high severity findings"),
    (keys::NO_RESOURCE_TITLE, "No {0} yet"),
    (
        keys::NO_RESOURCE_DETAIL_POLICY,
        "You do not have any policies yet. Create a policy to start tracking compliance.",
    ),
    (keys::ROUTES_GRC, "Governance and risk"),
    (keys::ROUTES_CREATE_POLICY, "Create policy"),
];

/// Locale-specific message lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: String,
    messages: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog {
    /// The built-in English catalog.
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            messages: ENGLISH
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Replace the locale tag and layer overrides on top of the current messages.
    pub fn with_overrides<I, K, V>(mut self, locale: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.locale = locale.into();
        self.messages
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Look up a message; an unknown key is returned as-is.
    pub fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up a message and substitute positional `{0}`, `{1}`, ... arguments.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.get(key), |message, (i, arg)| {
                message.replace(&format!("{{{i}}}"), arg)
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Localized label of the catch-all bucket.
    pub fn other_label(&self) -> String {
        self.get(keys::OTHER)
    }
}
