//! Event types for the widget event bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marin_core::{WidgetInstanceId, WidgetKind};

/// Metadata attached to every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
    /// Correlation ID linking an outcome to the broadcast that caused it.
    pub correlation_id: Option<Uuid>,
    /// Source component that generated the event.
    pub source: String,
}

impl EventMetadata {
    /// Create new event metadata.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            correlation_id: None,
            source: source.into(),
        }
    }

    /// Set correlation ID.
    #[must_use]
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new("unknown")
    }
}

/// Events exchanged between the platform, the host and the widget pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// A platform broadcast, either periodic or explicitly sent.
    Broadcast {
        /// Event metadata.
        metadata: EventMetadata,
        /// Broadcast action identifier.
        action: String,
        /// Widget kind the broadcast is addressed to, if any.
        target: Option<WidgetKind>,
    },

    /// A refresh of one widget kind finished.
    DispatchCompleted {
        /// Event metadata.
        metadata: EventMetadata,
        /// Kind that was refreshed.
        kind: WidgetKind,
        /// Instances updated successfully.
        rendered: Vec<WidgetInstanceId>,
        /// Instances the platform refused to update.
        failed: Vec<WidgetInstanceId>,
    },
}

impl WidgetEvent {
    /// Build a broadcast event.
    #[must_use]
    pub fn broadcast(
        source: impl Into<String>,
        action: impl Into<String>,
        target: Option<WidgetKind>,
    ) -> Self {
        Self::Broadcast {
            metadata: EventMetadata::new(source),
            action: action.into(),
            target,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Broadcast { .. } => "broadcast",
            Self::DispatchCompleted { .. } => "dispatch_completed",
        }
    }

    /// Get the event metadata.
    #[must_use]
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            Self::Broadcast { metadata, .. } | Self::DispatchCompleted { metadata, .. } => metadata,
        }
    }

    /// Widget kind this event concerns, if it names one.
    #[must_use]
    pub fn kind(&self) -> Option<WidgetKind> {
        match self {
            Self::Broadcast { target, .. } => *target,
            Self::DispatchCompleted { kind, .. } => Some(*kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_constructor() {
        let event = WidgetEvent::broadcast("platform", "REFRESH", Some(WidgetKind::Vessel));
        assert_eq!(event.event_type(), "broadcast");
        assert_eq!(event.metadata().source, "platform");
        assert_eq!(event.kind(), Some(WidgetKind::Vessel));
    }

    #[test]
    fn test_serialization_is_tagged() {
        let event = WidgetEvent::DispatchCompleted {
            metadata: EventMetadata::new("dispatcher"),
            kind: WidgetKind::AlertHistory,
            rendered: vec![WidgetInstanceId::new(3)],
            failed: Vec::new(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "dispatch_completed");
        assert_eq!(json["kind"], "alert-history");
        assert_eq!(json["rendered"][0], 3);

        let back: WidgetEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back.event_type(), "dispatch_completed");
    }

    #[test]
    fn test_correlation_id() {
        let id = Uuid::new_v4();
        let metadata = EventMetadata::new("x").with_correlation_id(id);
        assert_eq!(metadata.correlation_id, Some(id));
        assert_eq!(EventMetadata::default().source, "unknown");
    }
}
