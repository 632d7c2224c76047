//! Marin Core - the pure half of the widget refresh pipeline.
//!
//! This crate provides:
//! - [`WidgetKind`] and [`WidgetInstanceId`], the identities every other crate routes on
//! - The snapshot parser, turning a raw stored string into a typed snapshot
//! - The slot mapper, turning a parse result into a fully-populated [`SlotSet`]
//!
//! Nothing here performs I/O. The store, the instance registry and the
//! renderer live in `marin-storage` and `marin-dispatch`.
//!
//! # Example
//!
//! ```rust
//! use marin_core::{WidgetKind, map_slots, parse_snapshot};
//!
//! let raw = r#"{"alertHistory": [
//!     {"time": "10:42", "date": "2024-05-01", "rollPeriod": "7.8 s"}
//! ]}"#;
//! let parsed = parse_snapshot(WidgetKind::AlertHistory, Some(raw));
//! let slots = map_slots(WidgetKind::AlertHistory, &parsed);
//!
//! assert_eq!(slots.get("alert1_time"), Some("10:42"));
//! assert_eq!(slots.get("alert2_time"), Some(" "));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod format;
mod kind;
mod slots;
mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
pub use format::format_decimal;
pub use kind::{WidgetInstanceId, WidgetKind};
pub use slots::{
    ALERT_ROWS, AlertHistorySlots, AlertRowSlots, BLANK, ERROR_LOADING_DATA, NO_VESSEL_DATA,
    SlotSet, TITLE_SLOT, VesselSlots, map_slots,
};
pub use snapshot::{
    AlertEntry, AlertHistorySnapshot, LoadingCondition, ParseResult, Snapshot, VesselProfile,
    VesselSnapshot, parse_snapshot,
};
