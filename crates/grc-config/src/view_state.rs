//! Persisted view state.
//!
//! The overview remembers which card choice the user picked last. State is
//! kept as a JSON object per key; the card choice lives under
//! `grcCardChoice` and any other fields written by other panels are carried
//! through untouched.

use grc_common::{CardChoice, Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// State key of the policy overview.
pub const POLICY_OVERVIEW_STATE_KEY: &str = "policy-overview";

/// One persisted view-state blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(
        rename = "grcCardChoice",
        default,
        deserialize_with = "lenient_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub grc_card_choice: Option<CardChoice>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// An unrecognized choice is treated as unset.
fn lenient_choice<'de, D>(deserializer: D) -> std::result::Result<Option<CardChoice>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

impl ViewState {
    /// Saved choice, or `fallback` when none was saved.
    pub fn card_choice_or(&self, fallback: CardChoice) -> CardChoice {
        self.grc_card_choice.unwrap_or(fallback)
    }

    /// Copy of this state with the card choice replaced.
    pub fn with_card_choice(&self, choice: CardChoice) -> Self {
        ViewState {
            grc_card_choice: Some(choice),
            extra: self.extra.clone(),
        }
    }
}

/// Storage for view-state blobs.
pub trait ViewStateStore {
    /// Load a state; missing or unreadable state yields the default.
    fn load(&self, key: &str) -> ViewState;

    /// Persist a state under a key.
    fn save(&self, key: &str, state: &ViewState) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileViewStateStore {
    dir: PathBuf,
}

impl FileViewStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key. Keys must be plain file stems.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        valid.then(|| self.dir.join(format!("{key}.json")))
    }
}

impl ViewStateStore for FileViewStateStore {
    fn load(&self, key: &str) -> ViewState {
        let Some(path) = self.path_for(key) else {
            warn!(key, "invalid view state key");
            return ViewState::default();
        };
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return ViewState::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable view state");
                return ViewState::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupt view state ignored");
                ViewState::default()
            }
        }
    }

    fn save(&self, key: &str, state: &ViewState) -> Result<()> {
        let path = self.path_for(key).ok_or_else(|| Error::ViewStateSave {
            key: key.to_string(),
            reason: "key must be a plain file name".to_string(),
        })?;
        let failed = |err: std::io::Error| Error::ViewStateSave {
            key: key.to_string(),
            reason: err.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(failed)?;
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(state)?;
        {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)
                .map_err(failed)?;
            file.write_all(&json).map_err(failed)?;
            file.flush().map_err(failed)?;
        }
        fs::rename(&tmp_path, &path).map_err(failed)?;
        debug!(key, path = %path.display(), "view state saved");
        Ok(())
    }
}

/// In-process store, for hosts without a state directory and for tests.
#[derive(Debug, Default)]
pub struct MemoryViewStateStore {
    states: Mutex<BTreeMap<String, ViewState>>,
}

impl MemoryViewStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewStateStore for MemoryViewStateStore {
    fn load(&self, key: &str) -> ViewState {
        match self.states.lock() {
            Ok(states) => states.get(key).cloned().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned().unwrap_or_default(),
        }
    }

    fn save(&self, key: &str, state: &ViewState) -> Result<()> {
        let mut states = match self.states.lock() {
            Ok(states) => states,
            Err(poisoned) => poisoned.into_inner(),
        };
        states.insert(key.to_string(), state.clone());
        Ok(())
    }
}
