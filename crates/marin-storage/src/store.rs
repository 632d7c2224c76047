//! Snapshot store trait and in-process implementations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{StorageError, StorageResult};

/// Read-only view of the host's key/value store.
///
/// Reads are synchronous local lookups. Implementations must return the
/// current value on every call; the pipeline never caches across refreshes.
pub trait SnapshotStore: Send + Sync {
    /// Get the serialized snapshot stored under `key`.
    ///
    /// Returns `None` if the key was never written or has been cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }
}

/// Validate that a key is safe to look up.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-memory snapshot store.
///
/// The write methods stand in for the host application; the pipeline
/// itself only calls [`SnapshotStore::get`].
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        data.insert(key.into(), value.into());
        Ok(())
    }

    /// Remove `key`. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.remove(key).is_some())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.get(key).cloned())
    }
}

// ---------------------------------------------------------------------------
// Prefixed view
// ---------------------------------------------------------------------------

/// A view into another store that prepends a fixed prefix to every key.
///
/// The host's preference layer stores `vesselData` as `flutter.vesselData`;
/// wrapping the raw store in a `PrefixedSnapshotStore` lets the pipeline
/// keep using the bare keys.
#[derive(Clone)]
pub struct PrefixedSnapshotStore {
    inner: Arc<dyn SnapshotStore>,
    prefix: String,
}

impl std::fmt::Debug for PrefixedSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixedSnapshotStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl PrefixedSnapshotStore {
    /// Wrap `store`, prefixing every key with `prefix`. An empty prefix
    /// passes keys through unchanged.
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>, prefix: impl Into<String>) -> Self {
        Self {
            inner: store,
            prefix: prefix.into(),
        }
    }

    /// The prefix applied to every key.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl SnapshotStore for PrefixedSnapshotStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        self.inner.get(&format!("{}{key}", self.prefix))
    }
}
