//! Renderer contract and the surface adapter.
//!
//! A [`Renderer`] takes a finished [`SlotSet`] to one widget instance. The
//! stock implementation, [`SurfaceRenderer`], converts the slots into a
//! [`SurfaceUpdate`] batch and hands it to a [`SurfaceHost`], the only
//! piece that talks to the real platform.

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use marin_core::{ALERT_ROWS, SlotSet, WidgetInstanceId, WidgetKind};

use crate::error::RenderResult;

/// Applies slots to a widget instance.
pub trait Renderer: Send + Sync {
    /// Render `slots` onto `instance`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`](crate::RenderError) if the platform could
    /// not update this instance.
    fn render(&self, instance: WidgetInstanceId, slots: &SlotSet) -> RenderResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, instance: WidgetInstanceId, slots: &SlotSet) -> RenderResult<()> {
        (**self).render(instance, slots)
    }
}

/// One operation in a surface update batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    /// Set the text of a display element.
    SetText {
        /// Element name.
        element: String,
        /// New text.
        text: String,
    },
    /// Make a display element visible.
    Show {
        /// Element name.
        element: String,
    },
}

/// An ordered batch of element updates for one widget instance.
///
/// Operations are applied in order and committed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceUpdate {
    ops: Vec<SurfaceOp>,
}

impl SurfaceUpdate {
    /// Create an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the update for a slot set.
    ///
    /// Every slot becomes one text operation, in layout order. Alert
    /// history updates first mark every row container visible, so blank
    /// rows still take up their place on the surface.
    #[must_use]
    pub fn from_slots(slots: &SlotSet) -> Self {
        let mut update = Self::new();

        if slots.kind() == WidgetKind::AlertHistory {
            for row in 1..=ALERT_ROWS {
                update.show(format!("alert{row}_container"));
            }
        }

        for (element, text) in slots.entries() {
            update.set_text(element, text);
        }

        update
    }

    /// Append a text operation.
    pub fn set_text(&mut self, element: impl Into<String>, text: impl Into<String>) {
        self.ops.push(SurfaceOp::SetText {
            element: element.into(),
            text: text.into(),
        });
    }

    /// Append a visibility operation.
    pub fn show(&mut self, element: impl Into<String>) {
        self.ops.push(SurfaceOp::Show {
            element: element.into(),
        });
    }

    /// All operations in application order.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Text assigned to `element` by this update, if any. Later
    /// operations win.
    #[must_use]
    pub fn text(&self, element: &str) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::SetText { element: e, text } if e == element => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether this update makes `element` visible.
    #[must_use]
    pub fn shows(&self, element: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, SurfaceOp::Show { element: e } if e == element))
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the update carries no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// The platform's widget update primitive.
pub trait SurfaceHost: Send + Sync {
    /// Apply and commit `update` on `instance`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`](crate::RenderError) if the instance is gone
    /// or the platform rejects the update.
    fn apply(&self, instance: WidgetInstanceId, update: SurfaceUpdate) -> RenderResult<()>;
}

impl<H: SurfaceHost + ?Sized> SurfaceHost for Arc<H> {
    fn apply(&self, instance: WidgetInstanceId, update: SurfaceUpdate) -> RenderResult<()> {
        (**self).apply(instance, update)
    }
}

/// Renderer that maps slots 1:1 onto display elements of a [`SurfaceHost`].
#[derive(Debug, Clone)]
pub struct SurfaceRenderer<H> {
    host: H,
}

impl<H: SurfaceHost> SurfaceRenderer<H> {
    /// Wrap a surface host.
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: SurfaceHost> Renderer for SurfaceRenderer<H> {
    fn render(&self, instance: WidgetInstanceId, slots: &SlotSet) -> RenderResult<()> {
        let update = SurfaceUpdate::from_slots(slots);
        trace!(
            instance = %instance,
            kind = %slots.kind(),
            ops = update.len(),
            "Applying surface update"
        );
        self.host.apply(instance, update)
    }
}
