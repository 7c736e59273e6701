use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};

pub const DEFAULT_STORE_FILE: &str = "store/dumpFile";

/// Embedder settings.
///
/// The list never reads `store_file` on its own; callers hand it to
/// [`SkipList::dump`](crate::SkipList::dump) and
/// [`SkipList::load`](crate::SkipList::load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Seed for node heights. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub store_file: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: None,
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PersistError::Options(e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| PersistError::Options(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PersistError::Options(e.to_string()))
    }
}
