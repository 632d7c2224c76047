//! Terminal stand-ins for the platform widget host.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use marin_core::{WidgetInstanceId, WidgetKind};
use marin_dispatch::{
    InstanceRegistry, RenderError, RenderResult, SurfaceHost, SurfaceOp, SurfaceUpdate,
};

use crate::theme::Theme;

/// Widget instances named on the command line.
///
/// The same instances are reported for every kind, as if each id were a
/// widget of whichever kind is being refreshed.
#[derive(Debug, Clone, Default)]
pub(crate) struct InstanceList {
    ids: Vec<WidgetInstanceId>,
}

impl InstanceList {
    pub(crate) fn new(ids: &[i32]) -> Self {
        Self {
            ids: ids.iter().copied().map(WidgetInstanceId::new).collect(),
        }
    }
}

impl InstanceRegistry for InstanceList {
    fn instances(&self, _kind: WidgetKind) -> Vec<WidgetInstanceId> {
        self.ids.clone()
    }
}

/// Surface host that prints each update to a terminal.
pub(crate) struct TerminalHost<W> {
    out: Mutex<W>,
}

impl TerminalHost<std::io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalHost<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Render `update` as the lines printed for `instance`.
///
/// Visibility operations are not printed; a terminal has nothing to hide.
pub(crate) fn format_update(instance: WidgetInstanceId, update: &SurfaceUpdate) -> String {
    let width = update
        .ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::SetText { element, .. } => Some(element.len()),
            SurfaceOp::Show { .. } => None,
        })
        .max()
        .unwrap_or(0);

    let header = Theme::header(&format!("widget #{instance}"));
    let mut out = format!("{}\n{header}\n", Theme::separator());
    for op in update.ops() {
        if let SurfaceOp::SetText { element, text } = op {
            out.push_str(&Theme::slot(element, text, width));
            out.push('\n');
        }
    }
    out
}

impl<W: Write + Send> SurfaceHost for TerminalHost<W> {
    fn apply(&self, instance: WidgetInstanceId, update: SurfaceUpdate) -> RenderResult<()> {
        let text = format_update(instance, &update);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| RenderError::Platform(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marin_core::SlotSet;

    #[test]
    fn test_instance_list_serves_every_kind() {
        let list = InstanceList::new(&[3, 4]);
        assert_eq!(list.instances(WidgetKind::Vessel).len(), 2);
        assert_eq!(list.instances(WidgetKind::AlertHistory).len(), 2);
        assert!(InstanceList::default().instances(WidgetKind::Vessel).is_empty());
    }

    #[test]
    fn test_format_update_prints_text_only() {
        colored::control::set_override(false);
        let mut update = SurfaceUpdate::new();
        update.show("alert1_container");
        update.set_text("widget_title", "Marin I");
        update.set_text("vessel_beam", "");

        let text = format_update(WidgetInstanceId::new(9), &update);
        assert!(text.contains("widget #9"));
        assert!(text.contains("  widget_title  Marin I\n"));
        assert!(text.contains("  vessel_beam   (blank)\n"));
        assert!(!text.contains("alert1_container"));
    }

    #[test]
    fn test_terminal_host_writes_update() {
        colored::control::set_override(false);
        let host = TerminalHost::new(Vec::new());
        let update = SurfaceUpdate::from_slots(&SlotSet::blank(WidgetKind::Vessel));
        host.apply(WidgetInstanceId::new(1), update).unwrap();

        let printed = String::from_utf8(host.into_inner()).unwrap();
        assert!(printed.contains("widget #1"));
        assert!(printed.contains("condition_vcg"));
        assert!(printed.contains("(blank)"));
    }
}
