//! Test harness helpers.

use std::sync::Arc;

use marin_core::{SlotSet, WidgetKind};
use marin_dispatch::{DispatchReport, InstanceRegistry, Renderer, WidgetDispatcher};
use marin_storage::{MemorySnapshotStore, SnapshotStore};
use tracing_subscriber::EnvFilter;

use crate::mocks::{RecordingRenderer, StaticRegistry};

/// Install a test-friendly tracing subscriber.
///
/// Output goes through the libtest capture. The filter comes from
/// `RUST_LOG`, falling back to `debug` for marin crates. Safe to call from
/// every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,marin_dispatch=debug,marin_events=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A dispatcher wired to an in-memory store, a static registry, and a
/// recording renderer, with handles kept to all three.
pub struct TestPipeline {
    /// Snapshot store the dispatcher reads from.
    pub store: Arc<MemorySnapshotStore>,
    /// Placed widget instances.
    pub registry: Arc<StaticRegistry>,
    /// Renderer recording every slot set it receives.
    pub renderer: Arc<RecordingRenderer>,
    /// The dispatcher under test.
    pub dispatcher: Arc<WidgetDispatcher>,
}

impl TestPipeline {
    /// Build a pipeline with an empty store and no placed widgets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(MemorySnapshotStore::new()),
            Arc::new(StaticRegistry::new()),
            Arc::new(RecordingRenderer::new()),
        )
    }

    /// Build a pipeline around existing parts.
    #[must_use]
    pub fn with_parts(
        store: Arc<MemorySnapshotStore>,
        registry: Arc<StaticRegistry>,
        renderer: Arc<RecordingRenderer>,
    ) -> Self {
        let store_view: Arc<dyn SnapshotStore> = store.clone();
        let registry_view: Arc<dyn InstanceRegistry> = registry.clone();
        let renderer_view: Arc<dyn Renderer> = renderer.clone();
        let dispatcher = Arc::new(WidgetDispatcher::new(store_view, registry_view, renderer_view));
        Self {
            store,
            registry,
            renderer,
            dispatcher,
        }
    }

    /// Place `ids` for `kind`.
    #[must_use]
    pub fn with_instances(self, kind: WidgetKind, ids: &[i32]) -> Self {
        self.registry.set_instances(kind, ids);
        self
    }

    /// Refresh every placed instance of `kind`.
    pub fn refresh(&self, kind: WidgetKind) -> DispatchReport {
        self.dispatcher.dispatch(kind)
    }

    /// The slot set most recently rendered for `instance`.
    #[must_use]
    pub fn last_rendered(&self, instance: i32) -> Option<SlotSet> {
        self.renderer
            .rendered()
            .into_iter()
            .rev()
            .find(|(id, _)| id.get() == instance)
            .map(|(_, slots)| slots)
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}
