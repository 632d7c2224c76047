//! `marin refresh`: refresh every placed widget of one kind.

use std::path::Path;

use anyhow::Result;
use marin_config::Config;
use marin_core::WidgetKind;

use super::print_report;
use crate::pipeline::build_dispatcher;

/// Refresh `kind` on `instances` from the preference file.
pub(crate) fn run_refresh(
    config: &Config,
    kind: WidgetKind,
    prefs: Option<&Path>,
    instances: &[i32],
) -> Result<()> {
    let dispatcher = build_dispatcher(config, prefs, instances)?;
    let report = dispatcher.dispatch(kind);
    print_report(&report);
    Ok(())
}
