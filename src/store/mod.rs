use crate::error::ScoutError;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Persisted set of listing ids that have already been contacted.
///
/// Stored as a JSON array at a configured path. A missing file is an empty
/// set; save overwrites the file in place.
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the seen-set, or an empty set when no store file exists yet.
    pub fn load(&self) -> Result<HashSet<String>, ScoutError> {
        if !self.path.exists() {
            debug!("No seen-store at {}, starting empty", self.path.display());
            return Ok(HashSet::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ScoutError::Storage(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ScoutError::Storage(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    /// Overwrite the store with the current seen-set.
    pub fn save(&self, seen: &HashSet<String>) -> Result<(), ScoutError> {
        let json = serde_json::to_string_pretty(seen)
            .map_err(|e| ScoutError::Storage(format!("failed to serialize seen-set: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            ScoutError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}
