//! `marin broadcast`: deliver a platform broadcast through the event bus.

use std::path::Path;

use anyhow::Result;
use marin_config::Config;
use marin_core::WidgetKind;
use marin_dispatch::DispatchSubscriber;
use marin_events::{EventBus, WidgetEvent};
use tracing::debug;

use super::print_outcome;
use crate::pipeline::{broadcast_router, build_dispatcher};
use crate::theme::Theme;

/// Event source name for broadcasts sent from the shell.
const SOURCE: &str = "cli";

/// Publish `action` and print what each resulting refresh did.
pub(crate) fn run_broadcast(
    config: &Config,
    action: &str,
    target: Option<WidgetKind>,
    prefs: Option<&Path>,
    instances: &[i32],
) -> Result<()> {
    let dispatcher = build_dispatcher(config, prefs, instances)?;
    let bus = EventBus::new();
    DispatchSubscriber::attach(&bus, broadcast_router(config), dispatcher);

    let mut receiver = bus.subscribe();
    bus.publish(WidgetEvent::broadcast(SOURCE, action, target));

    let mut refreshed = 0_usize;
    while let Some(event) = receiver.try_recv() {
        debug!(event_type = event.event_type(), "Event received");
        if let WidgetEvent::DispatchCompleted {
            kind,
            rendered,
            failed,
            ..
        } = event.as_ref()
        {
            print_outcome(*kind, rendered.len(), failed);
            refreshed = refreshed.saturating_add(1);
        }
    }

    if refreshed == 0 {
        println!(
            "{}",
            Theme::info(&format!("{action}: not a widget refresh action, nothing done"))
        );
    }
    Ok(())
}
