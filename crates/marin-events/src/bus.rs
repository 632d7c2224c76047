//! Event bus for broadcasting widget events to subscribers.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use marin_core::WidgetKind;

use crate::event::WidgetEvent;
use crate::subscriber::SubscriberRegistry;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting events to all subscribers.
///
/// Synchronous subscribers (the refresh dispatcher among them) run inline
/// on the publishing thread. Async receivers get a copy through a
/// broadcast channel and may lag without affecting the publisher.
///
/// Clones share the channel and the subscriber registry.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Arc<WidgetEvent>>,
    registry: Arc<SubscriberRegistry>,
    capacity: usize,
}

impl EventBus {
    /// Create a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            registry: Arc::new(SubscriberRegistry::new()),
            capacity,
        }
    }

    /// Publish an event to all subscribers.
    ///
    /// Async receivers are sent the event first, then synchronous
    /// subscribers are notified in turn. Returns the number of async
    /// receivers that received the event.
    pub fn publish(&self, event: WidgetEvent) -> usize {
        let event = Arc::new(event);

        trace!(event_type = %event.event_type(), "Publishing event");

        let count = if let Ok(c) = self.sender.send(Arc::clone(&event)) {
            debug!(
                event_type = %event.event_type(),
                receiver_count = c,
                "Event published"
            );
            c
        } else {
            trace!(event_type = %event.event_type(), "No receivers for event");
            0
        };

        self.registry.notify(&event, self);

        count
    }

    /// Subscribe to all events.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), None)
    }

    /// Subscribe to events concerning one widget kind only.
    ///
    /// Broadcasts without a target are not delivered to kind-filtered
    /// receivers.
    #[must_use]
    pub fn subscribe_kind(&self, kind: WidgetKind) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), Some(kind))
    }

    /// Get the synchronous subscriber registry.
    #[must_use]
    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Get the current number of subscribers (async and synchronous).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender
            .receiver_count()
            .saturating_add(self.registry.len())
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            registry: Arc::clone(&self.registry),
            capacity: self.capacity,
        }
    }
}

/// Receiver for events from the event bus.
pub struct EventReceiver {
    receiver: broadcast::Receiver<Arc<WidgetEvent>>,
    kind: Option<WidgetKind>,
}

impl EventReceiver {
    pub(crate) fn new(
        receiver: broadcast::Receiver<Arc<WidgetEvent>>,
        kind: Option<WidgetKind>,
    ) -> Self {
        Self { receiver, kind }
    }

    fn matches(&self, event: &WidgetEvent) -> bool {
        match self.kind {
            None => true,
            Some(kind) => event.kind() == Some(kind),
        }
    }

    /// Receive the next matching event.
    ///
    /// Returns `None` once the bus and all its clones are dropped.
    pub async fn recv(&mut self) -> Option<Arc<WidgetEvent>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Try to receive the next matching event without blocking.
    pub fn try_recv(&mut self) -> Option<Arc<WidgetEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventMetadata;
    use crate::subscriber::{EventSubscriber, FilterSubscriber};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn completed(kind: WidgetKind) -> WidgetEvent {
        WidgetEvent::DispatchCompleted {
            metadata: EventMetadata::new("test"),
            kind,
            rendered: Vec::new(),
            failed: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        let count = bus.publish(WidgetEvent::broadcast("test", "UPDATE", None));
        assert_eq!(count, 1);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "broadcast");
    }

    #[tokio::test]
    async fn test_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(completed(WidgetKind::Vessel)), 0);
    }

    #[tokio::test]
    async fn test_kind_subscription_filters() {
        let bus = EventBus::new();
        let mut vessel = bus.subscribe_kind(WidgetKind::Vessel);
        let mut all = bus.subscribe();

        bus.publish(completed(WidgetKind::AlertHistory));
        bus.publish(WidgetEvent::broadcast("test", "UPDATE", None));
        bus.publish(completed(WidgetKind::Vessel));

        let event = vessel.try_recv().unwrap();
        assert_eq!(event.kind(), Some(WidgetKind::Vessel));
        assert!(vessel.try_recv().is_none());

        assert!(all.try_recv().is_some());
        assert!(all.try_recv().is_some());
        assert!(all.try_recv().is_some());
        assert!(all.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_cloned_bus_shares_synchronous_subscribers() {
        let bus = EventBus::new();
        let cloned_bus = bus.clone();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        cloned_bus
            .registry()
            .register(Arc::new(FilterSubscriber::new("sync", move |_| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })));

        bus.publish(completed(WidgetKind::Vessel));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscriber_can_publish_reentrantly() {
        struct Echo;

        impl EventSubscriber for Echo {
            fn accepts(&self, event: &WidgetEvent) -> bool {
                matches!(event, WidgetEvent::Broadcast { .. })
            }

            fn on_event(&self, _event: &WidgetEvent, bus: &EventBus) {
                bus.publish(completed(WidgetKind::AlertHistory));
            }
        }

        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        bus.registry().register(Arc::new(Echo));

        bus.publish(WidgetEvent::broadcast("test", "UPDATE", None));

        assert_eq!(receiver.try_recv().unwrap().event_type(), "broadcast");
        assert_eq!(
            receiver.try_recv().unwrap().event_type(),
            "dispatch_completed"
        );
    }

    #[tokio::test]
    async fn test_lagged_receiver_keeps_receiving() {
        let bus = EventBus::with_capacity(2);
        let mut receiver = bus.subscribe();
        for _ in 0..5 {
            bus.publish(completed(WidgetKind::Vessel));
        }
        assert!(receiver.try_recv().is_some());
    }
}
