//! Common imports for tests.
//!
//! ```
//! use marin_test::prelude::*;
//! ```

pub use crate::fixtures::{
    ALERT_HISTORY_KEY, PrefsFile, VESSEL_KEY, alert_entry, alert_history_json,
    alert_history_snapshot, seeded_store, vessel_snapshot, vessel_snapshot_json,
};
pub use crate::harness::{TestPipeline, init_test_logging};
pub use crate::mocks::{RecordingHost, RecordingRenderer, StaticRegistry, UnreadableStore};
