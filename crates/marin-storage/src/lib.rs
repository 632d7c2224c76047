//! Marin Storage - the snapshot store as seen from the widget pipeline.
//!
//! The host application owns persistence. The pipeline only ever reads,
//! through the single-operation [`SnapshotStore`] trait:
//!
//! ```text
//! get(key) -> Option<String>
//! ```
//!
//! # Backends
//!
//! - [`MemorySnapshotStore`]: in-process map, for tests and embedding hosts
//!   that push snapshots directly
//! - [`JsonFileStore`]: the host's preference file, a flat JSON object of
//!   string values, re-read on every lookup
//! - [`PrefixedSnapshotStore`]: wraps any store and adds the key prefix the
//!   host's preference layer applies (`flutter.vesselData`)

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod file;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use store::{MemorySnapshotStore, PrefixedSnapshotStore, SnapshotStore};
