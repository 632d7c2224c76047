//! Widget instance registry contract.

use std::sync::Arc;

use marin_core::{WidgetInstanceId, WidgetKind};

/// Enumerates the live widget instances the platform has placed.
///
/// The pipeline never creates or destroys instances; it only asks which
/// ones currently exist for a kind.
pub trait InstanceRegistry: Send + Sync {
    /// Live instances of `kind`. Empty when the widget is not placed.
    fn instances(&self, kind: WidgetKind) -> Vec<WidgetInstanceId>;
}

impl<R: InstanceRegistry + ?Sized> InstanceRegistry for Arc<R> {
    fn instances(&self, kind: WidgetKind) -> Vec<WidgetInstanceId> {
        (**self).instances(kind)
    }
}
