//! Marin Dispatch - the refresh side of the widget pipeline.
//!
//! This crate provides:
//! - [`InstanceRegistry`] and [`Renderer`], the platform-facing contracts
//! - [`SurfaceRenderer`], which maps slots onto display elements of a [`SurfaceHost`]
//! - [`WidgetDispatcher`], one refresh cycle per widget kind
//! - [`BroadcastRouter`] and [`DispatchSubscriber`] for platform broadcasts
//! - [`CommandChannel`] for refreshes requested by the host application
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use marin_core::{SlotSet, WidgetInstanceId, WidgetKind};
//! use marin_dispatch::{InstanceRegistry, RenderResult, Renderer, WidgetDispatcher};
//! use marin_storage::MemorySnapshotStore;
//!
//! struct Placed;
//!
//! impl InstanceRegistry for Placed {
//!     fn instances(&self, _kind: WidgetKind) -> Vec<WidgetInstanceId> {
//!         vec![WidgetInstanceId::new(42)]
//!     }
//! }
//!
//! struct Discard;
//!
//! impl Renderer for Discard {
//!     fn render(&self, _instance: WidgetInstanceId, _slots: &SlotSet) -> RenderResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let dispatcher = WidgetDispatcher::new(
//!     Arc::new(MemorySnapshotStore::new()),
//!     Arc::new(Placed),
//!     Arc::new(Discard),
//! );
//!
//! let report = dispatcher.dispatch(WidgetKind::Vessel);
//! assert_eq!(report.rendered, vec![WidgetInstanceId::new(42)]);
//! assert_eq!(dispatcher.render_slots(WidgetKind::Vessel).title(), "No vessel data");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod command;
mod dispatcher;
mod error;
mod registry;
mod router;
mod surface;

pub use command::{
    CommandChannel, CommandResponse, DEFAULT_ALERT_HISTORY_COMMAND, DEFAULT_VESSEL_COMMAND,
    MethodCall,
};
pub use dispatcher::{
    DEFAULT_ALERT_HISTORY_KEY, DEFAULT_VESSEL_KEY, DispatchReport, SnapshotKeys, WidgetDispatcher,
};
pub use error::{RenderError, RenderResult};
pub use registry::InstanceRegistry;
pub use router::{
    BroadcastRouter, DEFAULT_ALERT_REFRESH_ACTION, DEFAULT_UPDATE_ACTION,
    DEFAULT_VESSEL_REFRESH_ACTION, DispatchSubscriber,
};
pub use surface::{Renderer, SurfaceHost, SurfaceOp, SurfaceRenderer, SurfaceUpdate};
