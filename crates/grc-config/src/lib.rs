//! GRC dashboard configuration loading and view-state persistence.
//!
//! This crate provides:
//! - The localized message catalog the cards are labelled from
//! - Typed `config.toml` settings with semantic validation
//! - Config resolution (CLI → env → XDG → defaults)
//! - Persisted view state (the remembered card choice)

pub mod error;
pub mod messages;
pub mod resolve;
pub mod settings;
pub mod validate;
pub mod view_state;

pub use error::ConfigError;
pub use messages::MessageCatalog;
pub use resolve::{
    default_view_state_dir, load_config, resolve_config, ConfigPath, ConfigSource, LoadedConfig,
};
pub use settings::GrcConfig;
pub use validate::{ValidationError, ValidationResult};
pub use view_state::{
    FileViewStateStore, MemoryViewStateStore, ViewState, ViewStateStore,
    POLICY_OVERVIEW_STATE_KEY,
};
