//! Typed `config.toml` settings.
//!
//! ```toml
//! locale = "fr"
//! default_choice = "categories"
//! view_state_dir = "/var/lib/grc-cards/state"
//!
//! [messages]
//! "overview.grc.overview.other" = "Autre"
//! ```

use crate::error::ConfigError;
use crate::messages::MessageCatalog;
use grc_common::CardChoice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrcConfig {
    /// Locale tag reported with the catalog.
    pub locale: String,

    /// Card choice used when no view state has been saved yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_choice: Option<String>,

    /// Directory holding persisted view-state blobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_state_dir: Option<PathBuf>,

    /// Message overrides keyed by catalog key.
    pub messages: BTreeMap<String, String>,
}

impl Default for GrcConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            default_choice: None,
            view_state_dir: None,
            messages: BTreeMap::new(),
        }
    }
}

impl GrcConfig {
    /// Load settings from a TOML file. The result is not validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parsed default choice; unset or unparsable falls back to standards.
    pub fn default_choice(&self) -> CardChoice {
        self.default_choice
            .as_deref()
            .and_then(|choice| choice.parse().ok())
            .unwrap_or_default()
    }

    /// English catalog with this config's locale and overrides applied.
    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::english().with_overrides(
            self.locale.clone(),
            self.messages
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::keys;

    #[test]
    fn test_parse_full_config() {
        let config: GrcConfig = toml::from_str(
            r#"
            locale = "fr"
            default_choice = "categories"
            view_state_dir = "/tmp/grc"

            [messages]
            "overview.grc.overview.other" = "Autre"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.default_choice(), CardChoice::Categories);
        assert_eq!(config.view_state_dir, Some(PathBuf::from("/tmp/grc")));

        let catalog = config.catalog();
        assert_eq!(catalog.locale(), "fr");
        assert_eq!(catalog.other_label(), "Autre");
        assert_eq!(catalog.get(keys::CARDS_STANDARDS), "Standards");
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: GrcConfig = toml::from_str("").unwrap();
        assert_eq!(config, GrcConfig::default());
        assert_eq!(config.default_choice(), CardChoice::Standards);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<GrcConfig>("colour = \"blue\"").is_err());
    }
}
