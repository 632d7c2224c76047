//! Marin Test - shared test utilities.
//!
//! Provides mocks for the platform seams, snapshot fixtures, and a
//! ready-wired dispatcher for tests across the workspace.
//!
//! # Usage
//!
//! ```
//! use marin_test::prelude::*;
//! use marin_core::WidgetKind;
//!
//! let pipeline = TestPipeline::new().with_instances(WidgetKind::Vessel, &[1]);
//! pipeline.store.set(VESSEL_KEY, vessel_snapshot_json()).unwrap();
//!
//! let report = pipeline.refresh(WidgetKind::Vessel);
//! assert_eq!(report.rendered.len(), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod fixtures;
pub mod harness;
pub mod mocks;
pub mod prelude;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
