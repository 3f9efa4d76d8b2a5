//! Errors raised while locating and loading configuration.

use crate::validate::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound { .. } => 12,
            ConfigError::Io { .. } => 13,
            ConfigError::Parse { .. } => 14,
            ConfigError::Invalid(err) => err.code(),
        }
    }
}

impl From<ConfigError> for grc_common::Error {
    fn from(err: ConfigError) -> Self {
        grc_common::Error::Config(err.to_string())
    }
}
