//! Prelude module - commonly used types for convenient import.
//!
//! Use `use marin_dispatch::prelude::*;` to import all essential types.

// Contracts
pub use crate::{InstanceRegistry, Renderer, SurfaceHost};

// Rendering
pub use crate::{RenderError, RenderResult, SurfaceOp, SurfaceRenderer, SurfaceUpdate};

// Dispatch
pub use crate::{DispatchReport, SnapshotKeys, WidgetDispatcher};

// Entry points
pub use crate::{BroadcastRouter, CommandChannel, CommandResponse, DispatchSubscriber, MethodCall};
