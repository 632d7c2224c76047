//! The refresh dispatcher.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use marin_core::{
    ParseResult, SlotSet, SnapshotError, WidgetInstanceId, WidgetKind, map_slots, parse_snapshot,
};
use marin_storage::SnapshotStore;

use crate::error::RenderError;
use crate::registry::InstanceRegistry;
use crate::surface::Renderer;

/// Default store key of the vessel snapshot.
pub const DEFAULT_VESSEL_KEY: &str = "vesselData";

/// Default store key of the alert history snapshot.
pub const DEFAULT_ALERT_HISTORY_KEY: &str = "alertHistoryData";

/// Store key each widget kind reads its snapshot from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKeys {
    vessel: String,
    alert_history: String,
}

impl SnapshotKeys {
    /// Create a key mapping.
    pub fn new(vessel: impl Into<String>, alert_history: impl Into<String>) -> Self {
        Self {
            vessel: vessel.into(),
            alert_history: alert_history.into(),
        }
    }

    /// The key for `kind`.
    #[must_use]
    pub fn key(&self, kind: WidgetKind) -> &str {
        match kind {
            WidgetKind::Vessel => &self.vessel,
            WidgetKind::AlertHistory => &self.alert_history,
        }
    }
}

impl Default for SnapshotKeys {
    fn default() -> Self {
        Self::new(DEFAULT_VESSEL_KEY, DEFAULT_ALERT_HISTORY_KEY)
    }
}

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Kind that was dispatched.
    pub kind: WidgetKind,
    /// Instances rendered successfully.
    pub rendered: Vec<WidgetInstanceId>,
    /// Instances whose render failed, with the reason.
    #[serde(serialize_with = "serialize_failures")]
    pub failed: Vec<(WidgetInstanceId, RenderError)>,
}

impl DispatchReport {
    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            rendered: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether no instance was touched (the widget is not placed).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.rendered.is_empty() && self.failed.is_empty()
    }

    /// Whether every instance rendered.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ids of the instances that failed.
    #[must_use]
    pub fn failed_ids(&self) -> Vec<WidgetInstanceId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }
}

fn serialize_failures<S>(
    failed: &[(WidgetInstanceId, RenderError)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(failed.len()))?;
    for (id, error) in failed {
        seq.serialize_element(&(id, error.to_string()))?;
    }
    seq.end()
}

/// Runs refresh cycles: enumerate instances, read, parse, map, render.
///
/// Dispatch is a pure function of the current store contents. Nothing is
/// cached between cycles, so dispatching twice over an unchanged store
/// renders identical slots.
#[derive(Clone)]
pub struct WidgetDispatcher {
    store: Arc<dyn SnapshotStore>,
    registry: Arc<dyn InstanceRegistry>,
    renderer: Arc<dyn Renderer>,
    keys: SnapshotKeys,
}

impl std::fmt::Debug for WidgetDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDispatcher")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl WidgetDispatcher {
    /// Create a dispatcher reading the default keys.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        registry: Arc<dyn InstanceRegistry>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            store,
            registry,
            renderer,
            keys: SnapshotKeys::default(),
        }
    }

    /// Read snapshots from `keys` instead of the defaults.
    #[must_use]
    pub fn with_keys(mut self, keys: SnapshotKeys) -> Self {
        self.keys = keys;
        self
    }

    /// The key mapping in use.
    #[must_use]
    pub fn keys(&self) -> &SnapshotKeys {
        &self.keys
    }

    /// Refresh every live instance of `kind`.
    ///
    /// Each instance reads the store and renders on its own. A failed
    /// render is logged and recorded; the remaining instances are still
    /// attempted. With no live instances this does nothing.
    pub fn dispatch(&self, kind: WidgetKind) -> DispatchReport {
        let instances = self.registry.instances(kind);
        let mut report = DispatchReport::new(kind);

        if instances.is_empty() {
            debug!(kind = %kind, "No live instances, nothing to refresh");
            return report;
        }

        debug!(kind = %kind, instances = instances.len(), "Dispatching refresh");

        for instance in instances {
            let slots = self.render_slots(kind);
            match self.renderer.render(instance, &slots) {
                Ok(()) => {
                    debug!(kind = %kind, instance = %instance, "Instance rendered");
                    report.rendered.push(instance);
                },
                Err(e) => {
                    warn!(
                        kind = %kind,
                        instance = %instance,
                        error = %e,
                        "Failed to render widget instance"
                    );
                    report.failed.push((instance, e));
                },
            }
        }

        info!(
            kind = %kind,
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            "Refresh dispatched"
        );

        report
    }

    /// Read, parse and map the current snapshot for `kind`.
    #[must_use]
    pub fn render_slots(&self, kind: WidgetKind) -> SlotSet {
        map_slots(kind, &self.read_snapshot(kind))
    }

    fn read_snapshot(&self, kind: WidgetKind) -> ParseResult {
        let key = self.keys.key(kind);
        match self.store.get(key) {
            Ok(raw) => parse_snapshot(kind, raw.as_deref()),
            Err(e) => {
                warn!(kind = %kind, key = %key, error = %e, "Failed to read snapshot store");
                ParseResult::Invalid(SnapshotError::Unreadable(e.to_string()))
            },
        }
    }
}
