//! Mock implementations for testing.
//!
//! All mocks use `std::sync` locks and record what they were asked to do,
//! so tests can assert on calls after the fact.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use marin_core::{SlotSet, WidgetInstanceId, WidgetKind};
use marin_dispatch::{
    InstanceRegistry, RenderError, RenderResult, Renderer, SurfaceHost, SurfaceUpdate,
};
use marin_storage::{SnapshotStore, StorageError, StorageResult};

// ---------------------------------------------------------------------------
// StaticRegistry
// ---------------------------------------------------------------------------

/// Instance registry backed by a fixed, editable table.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    instances: RwLock<HashMap<WidgetKind, Vec<WidgetInstanceId>>>,
}

impl StaticRegistry {
    /// Create a registry with no placed widgets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `ids` for `kind`, replacing any previous set.
    #[must_use]
    pub fn with_instances(self, kind: WidgetKind, ids: &[i32]) -> Self {
        self.set_instances(kind, ids);
        self
    }

    /// Replace the placed instances of `kind`.
    pub fn set_instances(&self, kind: WidgetKind, ids: &[i32]) {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, ids.iter().copied().map(WidgetInstanceId::new).collect());
    }
}

impl InstanceRegistry for StaticRegistry {
    fn instances(&self, kind: WidgetKind) -> Vec<WidgetInstanceId> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Failure injection
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct FailureSet {
    stale: HashSet<WidgetInstanceId>,
    platform: HashMap<WidgetInstanceId, String>,
}

impl FailureSet {
    fn check(&self, instance: WidgetInstanceId) -> RenderResult<()> {
        if self.stale.contains(&instance) {
            return Err(RenderError::StaleInstance(instance));
        }
        if let Some(message) = self.platform.get(&instance) {
            return Err(RenderError::Platform(message.clone()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

/// Surface host that records every update it is asked to apply.
///
/// Instances marked stale or failing reject updates; rejected updates are
/// not recorded as applied but are counted as attempts.
#[derive(Debug, Default)]
pub struct RecordingHost {
    failures: FailureSet,
    attempts: Mutex<Vec<WidgetInstanceId>>,
    applied: Mutex<Vec<(WidgetInstanceId, SurfaceUpdate)>>,
}

impl RecordingHost {
    /// Create a host that accepts every update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject updates to `id` as a stale instance.
    #[must_use]
    pub fn with_stale_instance(mut self, id: i32) -> Self {
        self.failures.stale.insert(WidgetInstanceId::new(id));
        self
    }

    /// Reject updates to `id` with a platform error.
    #[must_use]
    pub fn with_platform_failure(mut self, id: i32, message: impl Into<String>) -> Self {
        self.failures
            .platform
            .insert(WidgetInstanceId::new(id), message.into());
        self
    }

    /// Every successfully applied update, in order.
    #[must_use]
    pub fn applied(&self) -> Vec<(WidgetInstanceId, SurfaceUpdate)> {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every instance an update was attempted on, in order.
    #[must_use]
    pub fn attempts(&self) -> Vec<WidgetInstanceId> {
        self.attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent update applied to `instance`.
    #[must_use]
    pub fn last_update(&self, instance: i32) -> Option<SurfaceUpdate> {
        let instance = WidgetInstanceId::new(instance);
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find_map(|(id, update)| (*id == instance).then(|| update.clone()))
    }
}

impl SurfaceHost for RecordingHost {
    fn apply(&self, instance: WidgetInstanceId, update: SurfaceUpdate) -> RenderResult<()> {
        self.attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(instance);
        self.failures.check(instance)?;
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((instance, update));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingRenderer
// ---------------------------------------------------------------------------

/// Renderer that records the slot sets it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    failures: FailureSet,
    rendered: Mutex<Vec<(WidgetInstanceId, SlotSet)>>,
}

impl RecordingRenderer {
    /// Create a renderer that accepts every render.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail renders to `id` as a stale instance.
    #[must_use]
    pub fn with_stale_instance(mut self, id: i32) -> Self {
        self.failures.stale.insert(WidgetInstanceId::new(id));
        self
    }

    /// Every render attempt, failed ones included, in order.
    #[must_use]
    pub fn rendered(&self) -> Vec<(WidgetInstanceId, SlotSet)> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of render attempts.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, instance: WidgetInstanceId, slots: &SlotSet) -> RenderResult<()> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((instance, slots.clone()));
        self.failures.check(instance)
    }
}

// ---------------------------------------------------------------------------
// UnreadableStore
// ---------------------------------------------------------------------------

/// Snapshot store whose every read fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreadableStore;

impl SnapshotStore for UnreadableStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Internal(format!("cannot read {key}")))
    }
}
