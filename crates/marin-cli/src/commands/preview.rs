//! `marin preview`: show what a widget would display, without rendering.

use std::path::Path;

use anyhow::Result;
use marin_config::Config;
use marin_core::WidgetKind;

use crate::pipeline::build_dispatcher;
use crate::theme::Theme;

/// Print the slot set `kind` maps to from the current preference file.
pub(crate) fn run_preview(
    config: &Config,
    kind: WidgetKind,
    prefs: Option<&Path>,
    json: bool,
) -> Result<()> {
    let slots = build_dispatcher(config, prefs, &[])?.render_slots(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    println!("{}", Theme::header(&format!("{kind} preview")));
    let entries = slots.entries();
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in entries {
        println!("{}", Theme::slot(name, value, width));
    }
    Ok(())
}
