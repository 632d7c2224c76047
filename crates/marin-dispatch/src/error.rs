//! Render errors.

use thiserror::Error;

use marin_core::WidgetInstanceId;

/// Errors applying slots to a widget instance.
///
/// These are isolated per instance. A failed render is logged and recorded
/// in the [`DispatchReport`](crate::DispatchReport); it never aborts the
/// rest of the dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The instance no longer exists on any surface.
    #[error("widget instance {0} is no longer placed")]
    StaleInstance(WidgetInstanceId),

    /// The platform refused the update.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
