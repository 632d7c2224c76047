//! Subcommand handlers.

pub(crate) mod broadcast;
pub(crate) mod call;
pub(crate) mod config;
pub(crate) mod preview;
pub(crate) mod refresh;

use marin_core::{WidgetInstanceId, WidgetKind};
use marin_dispatch::DispatchReport;

use crate::theme::Theme;

/// Print the outcome of refreshing one kind.
pub(crate) fn print_outcome(kind: WidgetKind, rendered: usize, failed: &[WidgetInstanceId]) {
    if rendered == 0 && failed.is_empty() {
        println!("{}", Theme::info(&format!("{kind}: no widgets placed")));
        return;
    }
    if failed.is_empty() {
        println!("{}", Theme::success(&format!("{kind}: {rendered} rendered")));
        return;
    }
    let ids = failed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}",
        Theme::warning(&format!("{kind}: {rendered} rendered, failed: {ids}"))
    );
}

/// Print a dispatch report, including each failure reason.
pub(crate) fn print_report(report: &DispatchReport) {
    for (instance, error) in &report.failed {
        eprintln!("{}", Theme::error(&format!("widget #{instance}: {error}")));
    }
    print_outcome(report.kind, report.rendered.len(), &report.failed_ids());
}
