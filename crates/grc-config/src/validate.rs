//! Configuration validation errors and semantic validation.

use crate::settings::GrcConfig;
use grc_common::CardChoice;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::SemanticError(_) => 15,
            ValidationError::MissingField(_) => 16,
            ValidationError::InvalidValue { .. } => 17,
        }
    }
}

/// Validate a loaded configuration semantically.
pub fn validate_config(config: &GrcConfig) -> ValidationResult<()> {
    if config.locale.trim().is_empty() {
        return Err(ValidationError::MissingField("locale".to_string()));
    }

    if let Some(ref choice) = config.default_choice {
        if choice.parse::<CardChoice>().is_err() {
            return Err(ValidationError::InvalidValue {
                field: "default_choice".to_string(),
                message: format!("expected 'categories' or 'standards', got '{}'", choice),
            });
        }
    }

    validate_messages(config)?;

    if let Some(ref dir) = config.view_state_dir {
        if dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "view_state_dir".to_string(),
                message: "must not be empty when set".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_messages(config: &GrcConfig) -> ValidationResult<()> {
    for (key, value) in &config.messages {
        if key.trim().is_empty() {
            return Err(ValidationError::SemanticError(
                "message override keys must not be empty".to_string(),
            ));
        }
        if value.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("messages.\"{}\"", key),
                message: "override text must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GrcConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_blank_locale() {
        let config = GrcConfig {
            locale: "  ".into(),
            ..GrcConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_default_choice() {
        let config = GrcConfig {
            default_choice: Some("controls".into()),
            ..GrcConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("default_choice"));
    }

    #[test]
    fn test_rejects_empty_message_override() {
        let mut config = GrcConfig::default();
        config
            .messages
            .insert("overview.grc.overview.other".into(), "".into());
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_view_state_dir() {
        let config = GrcConfig {
            view_state_dir: Some(PathBuf::new()),
            ..GrcConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
