//! Prelude module - commonly used types for convenient import.
//!
//! Use `use marin_core::prelude::*;` to import all essential types.

// Identities
pub use crate::{WidgetInstanceId, WidgetKind};

// Snapshots
pub use crate::{ParseResult, Snapshot, SnapshotError, parse_snapshot};

// Slots
pub use crate::{SlotSet, map_slots};
