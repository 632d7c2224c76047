//! Shared harness for integration tests.

use std::sync::Arc;

use marin_core::WidgetKind;
use marin_dispatch::{
    InstanceRegistry, Renderer, SnapshotKeys, SurfaceRenderer, SurfaceUpdate, WidgetDispatcher,
};
use marin_storage::{JsonFileStore, PrefixedSnapshotStore, SnapshotStore};
use marin_test::{PREFS_PREFIX, PrefsFile, RecordingHost, StaticRegistry};

/// The full pipeline over a real preference file: file store behind the
/// key prefix, a static registry, and a recording surface host.
///
/// The preference file is deleted when the harness is dropped.
#[allow(dead_code)]
pub struct FilePipeline {
    /// The host's preference file.
    pub prefs: PrefsFile,
    /// Placed widget instances.
    pub registry: Arc<StaticRegistry>,
    /// Records every surface update.
    pub host: Arc<RecordingHost>,
    /// Dispatcher wired to all of the above.
    pub dispatcher: WidgetDispatcher,
}

#[allow(dead_code)]
impl FilePipeline {
    /// Build a pipeline with an empty preference file and no widgets.
    pub fn new() -> Self {
        Self::with_host(RecordingHost::new())
    }

    /// Build a pipeline around a preconfigured host.
    pub fn with_host(host: RecordingHost) -> Self {
        let prefs = PrefsFile::new().unwrap();
        let registry = Arc::new(StaticRegistry::new());
        let host = Arc::new(host);

        let dispatcher = WidgetDispatcher::new(
            prefixed_store(&prefs),
            registry.clone() as Arc<dyn InstanceRegistry>,
            Arc::new(SurfaceRenderer::new(Arc::clone(&host))) as Arc<dyn Renderer>,
        );

        Self {
            prefs,
            registry,
            host,
            dispatcher,
        }
    }

    /// Read snapshots from custom keys.
    pub fn with_keys(mut self, keys: SnapshotKeys) -> Self {
        self.dispatcher = self.dispatcher.with_keys(keys);
        self
    }

    /// Place `ids` for `kind`.
    pub fn place(&self, kind: WidgetKind, ids: &[i32]) {
        self.registry.set_instances(kind, ids);
    }

    /// The last update applied to `instance`, which must exist.
    pub fn surface(&self, instance: i32) -> SurfaceUpdate {
        self.host
            .last_update(instance)
            .unwrap_or_else(|| panic!("no update applied to widget #{instance}"))
    }
}

/// The preference file as the pipeline sees it.
pub fn prefixed_store(prefs: &PrefsFile) -> Arc<dyn SnapshotStore> {
    let file: Arc<dyn SnapshotStore> = Arc::new(JsonFileStore::new(prefs.path()));
    Arc::new(PrefixedSnapshotStore::new(file, PREFS_PREFIX))
}
