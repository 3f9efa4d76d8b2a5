//! Raw GRC resources as delivered by the data loader.
//!
//! Field names follow the wire shape of the console API. Every field is
//! optional on the wire: absent or `null` values deserialize to empty
//! defaults and never fail the parse.

use crate::selection::CardChoice;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annotation holding comma-delimited policy categories.
pub const CATEGORIES_ANNOTATION: &str = "policy.mcm.ibm.com/categories";

/// Annotation holding comma-delimited policy standards.
pub const STANDARDS_ANNOTATION: &str = "policy.mcm.ibm.com/standards";

/// Compliance value reported by a compliant cluster.
pub const COMPLIANT: &str = "Compliant";

/// Compliance value reported by a non-compliant cluster.
pub const NON_COMPLIANT: &str = "NonCompliant";

/// Severity value counted as high severity.
pub const HIGH_SEVERITY: &str = "High";

/// A compliance policy evaluated against one or more clusters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawPolicy {
    #[serde(default)]
    pub metadata: PolicyMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<PolicyRaw>,
}

/// Policy object metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// The raw policy document as stored by the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyRaw {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PolicyStatus>,
}

/// Per-cluster compliance status block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BTreeMap<String, Option<ClusterCompliance>>>,
}

/// Compliance reported by a single cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterCompliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliant: Option<String>,
}

impl RawPolicy {
    /// Create a policy with the given name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        RawPolicy {
            metadata: PolicyMetadata {
                name: name.into(),
                annotations: None,
            },
            raw: None,
        }
    }

    /// Set an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the compliance string reported by one cluster.
    pub fn with_status(mut self, cluster: impl Into<String>, compliant: impl Into<String>) -> Self {
        self.statuses_mut().insert(
            cluster.into(),
            Some(ClusterCompliance {
                compliant: Some(compliant.into()),
            }),
        );
        self
    }

    /// Record a cluster that reported no compliance value.
    pub fn with_unreported_status(mut self, cluster: impl Into<String>) -> Self {
        self.statuses_mut().insert(cluster.into(), None);
        self
    }

    fn statuses_mut(&mut self) -> &mut BTreeMap<String, Option<ClusterCompliance>> {
        self.raw
            .get_or_insert_with(PolicyRaw::default)
            .status
            .get_or_insert_with(PolicyStatus::default)
            .status
            .get_or_insert_with(BTreeMap::new)
    }

    /// Policy name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The raw delimited classification string for the given kind, or `""`.
    pub fn classification(&self, choice: CardChoice) -> &str {
        let key = match choice {
            CardChoice::Categories => CATEGORIES_ANNOTATION,
            CardChoice::Standards => STANDARDS_ANNOTATION,
        };
        self.metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(key))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate `(cluster, non_compliant)` over the policy's status entries.
    ///
    /// A missing or empty compliance value counts as non-compliant.
    pub fn cluster_statuses(&self) -> impl Iterator<Item = (&str, bool)> {
        self.raw
            .as_ref()
            .and_then(|raw| raw.status.as_ref())
            .and_then(|status| status.status.as_ref())
            .into_iter()
            .flat_map(|statuses| statuses.iter())
            .map(|(cluster, entry)| {
                let compliant = entry.as_ref().and_then(|e| e.compliant.as_deref());
                (cluster.as_str(), is_non_compliant(compliant))
            })
    }
}

/// Whether a cluster's compliance value marks it non-compliant.
pub fn is_non_compliant(compliant: Option<&str>) -> bool {
    match compliant {
        None | Some("") => true,
        Some(value) => value.eq_ignore_ascii_case(NON_COMPLIANT),
    }
}

/// A security finding with severity and classification tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawFinding {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        rename = "securityClassification",
        skip_serializing_if = "Option::is_none"
    )]
    pub security_classification: Option<SecurityClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding: Option<FindingDetail>,
}

/// Category and standard tags attached to a finding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecurityClassification {
    #[serde(
        default,
        rename = "securityCategories",
        skip_serializing_if = "Option::is_none"
    )]
    pub security_categories: Option<Vec<String>>,
    #[serde(
        default,
        rename = "securityStandards",
        skip_serializing_if = "Option::is_none"
    )]
    pub security_standards: Option<Vec<String>>,
}

/// Finding detail block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FindingDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl RawFinding {
    pub fn new(name: impl Into<String>) -> Self {
        RawFinding {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classification_mut().security_categories =
            Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_standards<I, S>(mut self, standards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classification_mut().security_standards =
            Some(standards.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.finding = Some(FindingDetail {
            severity: Some(severity.into()),
        });
        self
    }

    fn classification_mut(&mut self) -> &mut SecurityClassification {
        self.security_classification
            .get_or_insert_with(SecurityClassification::default)
    }

    /// The classification tags for the given kind, or an empty slice.
    pub fn classification(&self, choice: CardChoice) -> &[String] {
        self.security_classification
            .as_ref()
            .and_then(|c| match choice {
                CardChoice::Categories => c.security_categories.as_deref(),
                CardChoice::Standards => c.security_standards.as_deref(),
            })
            .unwrap_or(&[])
    }

    /// The severity string, if any.
    pub fn severity(&self) -> Option<&str> {
        self.finding.as_ref().and_then(|f| f.severity.as_deref())
    }

    /// Whether the severity is case-insensitively `High`.
    pub fn is_high_severity(&self) -> bool {
        is_high_severity(self.severity())
    }
}

/// Whether a severity value counts as high severity.
pub fn is_high_severity(severity: Option<&str>) -> bool {
    severity.is_some_and(|s| s.eq_ignore_ascii_case(HIGH_SEVERITY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_deserializes_wire_shape() {
        let json = r#"{
            "metadata": {
                "name": "policy-pod",
                "annotations": {
                    "policy.mcm.ibm.com/standards": "NIST, PCI",
                    "policy.mcm.ibm.com/categories": "SystemAndCommunicationsProtections"
                }
            },
            "raw": {"status": {"status": {
                "cluster1": {"compliant": "NonCompliant"},
                "cluster2": {"compliant": "compliant"}
            }}}
        }"#;
        let policy: RawPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.name(), "policy-pod");
        assert_eq!(policy.classification(CardChoice::Standards), "NIST, PCI");
        let statuses: Vec<_> = policy.cluster_statuses().collect();
        assert_eq!(statuses, vec![("cluster1", true), ("cluster2", false)]);
    }

    #[test]
    fn test_policy_missing_fields_default() {
        let policy: RawPolicy =
            serde_json::from_str(r#"{"metadata": {"annotations": null}}"#).unwrap();
        assert_eq!(policy.name(), "");
        assert_eq!(policy.classification(CardChoice::Categories), "");
        assert_eq!(policy.cluster_statuses().count(), 0);

        let empty: RawPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RawPolicy::default());
    }

    #[test]
    fn test_null_cluster_entry_is_non_compliant() {
        let policy: RawPolicy = serde_json::from_str(
            r#"{"metadata": {"name": "p"}, "raw": {"status": {"status": {"c1": null, "c2": {}}}}}"#,
        )
        .unwrap();
        let statuses: Vec<_> = policy.cluster_statuses().collect();
        assert_eq!(statuses, vec![("c1", true), ("c2", true)]);
    }

    #[test]
    fn test_is_non_compliant() {
        assert!(is_non_compliant(None));
        assert!(is_non_compliant(Some("")));
        assert!(is_non_compliant(Some("NonCompliant")));
        assert!(is_non_compliant(Some("noncompliant")));
        assert!(!is_non_compliant(Some("Compliant")));
        // Unknown values are truthy and not "noncompliant"
        assert!(!is_non_compliant(Some("Pending")));
    }

    #[test]
    fn test_finding_deserializes_wire_shape() {
        let json = r#"{
            "name": "finding-1",
            "securityClassification": {
                "securityCategories": ["Access-Control"],
                "securityStandards": ["PCI"]
            },
            "finding": {"severity": "HIGH"}
        }"#;
        let finding: RawFinding = serde_json::from_str(json).unwrap();
        assert_eq!(
            finding.classification(CardChoice::Categories),
            &["Access-Control".to_string()]
        );
        assert!(finding.is_high_severity());
    }

    #[test]
    fn test_finding_missing_fields_default() {
        let finding: RawFinding = serde_json::from_str(r#"{"name": "f"}"#).unwrap();
        assert!(finding.classification(CardChoice::Standards).is_empty());
        assert_eq!(finding.severity(), None);
        assert!(!finding.is_high_severity());
    }

    #[test]
    fn test_builders() {
        let policy = RawPolicy::new("p1")
            .with_annotation(STANDARDS_ANNOTATION, "PCI")
            .with_status("c1", NON_COMPLIANT)
            .with_unreported_status("c2");
        assert_eq!(policy.classification(CardChoice::Standards), "PCI");
        assert_eq!(policy.cluster_statuses().filter(|(_, nc)| *nc).count(), 2);

        let finding = RawFinding::new("f1")
            .with_standards(["PCI"])
            .with_severity("Low");
        assert_eq!(finding.classification(CardChoice::Standards).len(), 1);
        assert!(!finding.is_high_severity());
    }
}
