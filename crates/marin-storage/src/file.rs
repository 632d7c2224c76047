//! Snapshot store backed by the host's preference file.
//!
//! The file is a flat JSON object. Snapshot documents are stored as JSON
//! strings inside it, so a vessel snapshot is itself a string value:
//!
//! ```json
//! {"flutter.vesselData": "{\"vesselProfile\": {...}, \"loadingCondition\": {...}}"}
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::trace;

use crate::error::{StorageError, StorageResult};
use crate::store::SnapshotStore;

/// Read-only store over a JSON preference file.
///
/// The file is read afresh on every lookup so that writes made by the host
/// between refreshes are always observed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store reading from `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "Preference file missing");
                return Ok(None);
            },
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                });
            },
        };

        let document: Value = serde_json::from_str(&contents)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let Value::Object(entries) = document else {
            return Err(StorageError::Serialization(format!(
                "{} is not a JSON object",
                self.path.display()
            )));
        };

        // A snapshot is always stored as a string; null counts as unset.
        match entries.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(other) => Err(StorageError::Serialization(format!(
                "{key} holds a non-string value: {other}"
            ))),
        }
    }
}
