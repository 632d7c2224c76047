//! Wiring the widget pipeline from configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use marin_config::Config;
use marin_core::WidgetKind;
use marin_dispatch::{
    BroadcastRouter, CommandChannel, InstanceRegistry, MethodCall, Renderer, SnapshotKeys,
    SurfaceRenderer, WidgetDispatcher,
};
use marin_storage::{JsonFileStore, PrefixedSnapshotStore, SnapshotStore};
use tracing::debug;

use crate::terminal::{InstanceList, TerminalHost};

/// The preference file to read: `--prefs` if given, else `store.prefs_path`.
pub(crate) fn resolve_prefs_path(config: &Config, prefs: Option<&Path>) -> Result<PathBuf> {
    match (prefs, &config.store.prefs_path) {
        (Some(path), _) => Ok(path.to_path_buf()),
        (None, Some(path)) => Ok(path.clone()),
        (None, None) => bail!(
            "no preference file given; pass --prefs or set store.prefs_path \
             (or MARIN_PREFS_PATH)"
        ),
    }
}

/// Build the snapshot store over the host's preference file, with the
/// configured key namespace applied.
pub(crate) fn build_store(config: &Config, prefs: &Path) -> Arc<dyn SnapshotStore> {
    debug!(path = %prefs.display(), prefix = %config.store.prefix, "Opening preference file");
    let file: Arc<dyn SnapshotStore> = Arc::new(JsonFileStore::new(prefs));
    Arc::new(PrefixedSnapshotStore::new(file, config.store.prefix.clone()))
}

/// Build a dispatcher that renders `instances` to stdout.
pub(crate) fn build_dispatcher(
    config: &Config,
    prefs: Option<&Path>,
    instances: &[i32],
) -> Result<WidgetDispatcher> {
    let prefs = resolve_prefs_path(config, prefs)?;
    let store = build_store(config, &prefs);
    let registry: Arc<dyn InstanceRegistry> = Arc::new(InstanceList::new(instances));
    let renderer: Arc<dyn Renderer> = Arc::new(SurfaceRenderer::new(TerminalHost::stdout()));

    Ok(WidgetDispatcher::new(store, registry, renderer).with_keys(snapshot_keys(config)))
}

/// Snapshot keys from the `[store]` section.
pub(crate) fn snapshot_keys(config: &Config) -> SnapshotKeys {
    SnapshotKeys::new(
        config.store.vessel_key.clone(),
        config.store.alert_history_key.clone(),
    )
}

/// Broadcast router from the `[events]` section.
pub(crate) fn broadcast_router(config: &Config) -> BroadcastRouter {
    BroadcastRouter::new(
        config.events.vessel_refresh_action.clone(),
        config.events.alert_refresh_action.clone(),
        config.events.update_action.clone(),
    )
}

/// Command channel bound from the `[commands]` section.
pub(crate) fn command_channel(config: &Config, dispatcher: WidgetDispatcher) -> CommandChannel {
    let commands = &config.commands;
    CommandChannel::new(dispatcher)
        .bind(
            MethodCall::new(commands.vessel.channel.clone(), commands.vessel.method.clone()),
            WidgetKind::Vessel,
        )
        .bind(
            MethodCall::new(
                commands.alert_history.channel.clone(),
                commands.alert_history.method.clone(),
            ),
            WidgetKind::AlertHistory,
        )
}
