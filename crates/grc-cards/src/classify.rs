//! Classification token extraction.

use crate::start_case::start_case;
use grc_common::{CardChoice, RawFinding, RawPolicy};

/// One classification value an item is grouped under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Trimmed token exactly as the item carries it. Cards are keyed by this.
    pub raw_name: String,
    /// Display form: start-cased for categories, the raw token for standards.
    /// Filters match against this.
    pub name: String,
}

impl Classification {
    pub fn new(raw_name: &str, choice: CardChoice) -> Self {
        let name = if choice.start_cases_names() {
            start_case(raw_name)
        } else {
            raw_name.to_string()
        };
        Classification {
            raw_name: raw_name.to_string(),
            name,
        }
    }
}

/// An item that carries classification tokens.
pub trait Classified {
    /// Untrimmed tokens for the given kind; empty when the item has none.
    fn raw_tokens(&self, choice: CardChoice) -> Vec<&str>;
}

impl Classified for RawPolicy {
    fn raw_tokens(&self, choice: CardChoice) -> Vec<&str> {
        let delimited = self.classification(choice);
        if delimited.is_empty() {
            Vec::new()
        } else {
            delimited.split(',').collect()
        }
    }
}

impl Classified for RawFinding {
    fn raw_tokens(&self, choice: CardChoice) -> Vec<&str> {
        self.classification(choice)
            .iter()
            .map(String::as_str)
            .collect()
    }
}

/// Extract the trimmed, non-empty classification tokens of an item.
///
/// An item without any tokens for the kind is classified under `other`.
/// Tokens that trim to nothing are dropped, so a value made only of
/// separators yields no classification at all.
pub fn extract<T: Classified + ?Sized>(
    item: &T,
    choice: CardChoice,
    other: &str,
) -> Vec<Classification> {
    let mut tokens = item.raw_tokens(choice);
    if tokens.is_empty() {
        tokens.push(other);
    }
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| Classification::new(token, choice))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_common::resource::{CATEGORIES_ANNOTATION, STANDARDS_ANNOTATION};

    fn names(classifications: &[Classification]) -> Vec<&str> {
        classifications.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_policy_tokens_split_and_trim() {
        let policy = RawPolicy::new("p").with_annotation(STANDARDS_ANNOTATION, " NIST , PCI,,");
        let tokens = extract(&policy, CardChoice::Standards, "Other");
        assert_eq!(names(&tokens), vec!["NIST", "PCI"]);
    }

    #[test]
    fn test_policy_without_annotation_is_other() {
        let policy = RawPolicy::new("p").with_annotation(STANDARDS_ANNOTATION, "PCI");
        let tokens = extract(&policy, CardChoice::Categories, "Other");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "Other");
        assert_eq!(tokens[0].raw_name, "Other");
    }

    #[test]
    fn test_policy_with_only_separators_has_no_tokens() {
        let policy = RawPolicy::new("p").with_annotation(STANDARDS_ANNOTATION, " , ");
        assert!(extract(&policy, CardChoice::Standards, "Other").is_empty());
    }

    #[test]
    fn test_categories_are_start_cased() {
        let policy =
            RawPolicy::new("p").with_annotation(CATEGORIES_ANNOTATION, "access-control");
        let tokens = extract(&policy, CardChoice::Categories, "Other");
        assert_eq!(tokens[0].name, "Access Control");
        assert_eq!(tokens[0].raw_name, "access-control");
    }

    #[test]
    fn test_standards_are_kept_raw() {
        let finding = RawFinding::new("f").with_standards(["nist-csf"]);
        let tokens = extract(&finding, CardChoice::Standards, "Other");
        assert_eq!(tokens[0].name, "nist-csf");
    }

    #[test]
    fn test_finding_tokens() {
        let finding = RawFinding::new("f").with_categories([" Access-Control ", "", "Audit"]);
        let tokens = extract(&finding, CardChoice::Categories, "Other");
        assert_eq!(names(&tokens), vec!["Access Control", "Audit"]);
        assert_eq!(tokens[0].raw_name, "Access-Control");
    }

    #[test]
    fn test_finding_without_tags_is_other() {
        let finding = RawFinding::new("f").with_categories(Vec::<String>::new());
        let tokens = extract(&finding, CardChoice::Categories, "Autre");
        assert_eq!(names(&tokens), vec!["Autre"]);
    }
}
