//! Snapshot documents and pre-seeded stores.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use marin_storage::{MemorySnapshotStore, StorageResult};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Bare store key of the vessel snapshot.
pub const VESSEL_KEY: &str = "vesselData";

/// Bare store key of the alert history snapshot.
pub const ALERT_HISTORY_KEY: &str = "alertHistoryData";

/// Prefix the host's preference layer adds to every key.
pub const PREFS_PREFIX: &str = "flutter.";

/// The reference vessel: "Marin I" in its "Departure" condition.
#[must_use]
pub fn vessel_snapshot() -> Value {
    json!({
        "vesselProfile": {
            "name": "Marin I",
            "length": 12.5,
            "beam": 4.0,
            "depth": 1.8
        },
        "loadingCondition": {
            "name": "Departure",
            "gm": 1.2,
            "vcg": 3.1
        }
    })
}

/// [`vessel_snapshot`] serialized as the host stores it.
#[must_use]
pub fn vessel_snapshot_json() -> String {
    vessel_snapshot().to_string()
}

/// One alert entry. `index` picks distinct field values.
#[must_use]
pub fn alert_entry(index: usize) -> Value {
    json!({
        "time": format!("10:{index:02}"),
        "date": format!("2024-05-{:02}", index.saturating_add(1)),
        "rollPeriod": format!("{}.5 s", index.saturating_add(6))
    })
}

/// Alert history document holding `count` entries built by [`alert_entry`].
#[must_use]
pub fn alert_history_snapshot(count: usize) -> Value {
    json!({ "alertHistory": (0..count).map(alert_entry).collect::<Vec<_>>() })
}

/// [`alert_history_snapshot`] serialized as the host stores it.
#[must_use]
pub fn alert_history_json(count: usize) -> String {
    alert_history_snapshot(count).to_string()
}

/// Memory store holding the reference vessel and `alerts` alert entries
/// under the bare keys.
///
/// # Errors
///
/// Returns an error if the store rejects a write.
pub fn seeded_store(alerts: usize) -> StorageResult<Arc<MemorySnapshotStore>> {
    let store = Arc::new(MemorySnapshotStore::new());
    store.set(VESSEL_KEY, vessel_snapshot_json())?;
    store.set(ALERT_HISTORY_KEY, alert_history_json(alerts))?;
    Ok(store)
}

/// A preference file in a temporary directory, laid out the way the host
/// writes it: a flat JSON object whose values are snapshot strings.
///
/// The directory is deleted when this is dropped.
#[derive(Debug)]
pub struct PrefsFile {
    dir: TempDir,
    path: PathBuf,
    entries: serde_json::Map<String, Value>,
}

impl PrefsFile {
    /// Create an empty preference file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory or file cannot be
    /// created.
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("FlutterSharedPreferences.json");
        let prefs = Self {
            dir,
            path,
            entries: serde_json::Map::new(),
        };
        prefs.flush()?;
        Ok(prefs)
    }

    /// Path of the preference file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the preference file.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Store `value` under the prefixed form of `key` and rewrite the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> std::io::Result<()> {
        self.entries
            .insert(format!("{PREFS_PREFIX}{key}"), Value::String(value.into()));
        self.flush()
    }

    /// Remove the prefixed form of `key` and rewrite the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn remove(&mut self, key: &str) -> std::io::Result<()> {
        self.entries.remove(&format!("{PREFS_PREFIX}{key}"));
        self.flush()
    }

    /// Overwrite the file with arbitrary contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_raw(&self, contents: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, contents)
    }

    fn flush(&self) -> std::io::Result<()> {
        self.write_raw(&Value::Object(self.entries.clone()).to_string())
    }
}
