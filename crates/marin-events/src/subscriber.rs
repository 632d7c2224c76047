//! Event subscriber trait and registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::bus::EventBus;
use crate::event::WidgetEvent;

/// Filter function type for event subscribers.
pub type EventFilter = Box<dyn Fn(&WidgetEvent) -> bool + Send + Sync>;

/// Trait for synchronous event subscribers.
///
/// Subscribers run on the publishing thread, in publish order. The bus is
/// passed in so a subscriber can publish follow-up events without holding
/// its own handle to the bus.
pub trait EventSubscriber: Send + Sync {
    /// Called when an event is published.
    fn on_event(&self, event: &WidgetEvent, bus: &EventBus);

    /// Return `true` to receive the event. Accepts everything by default.
    fn accepts(&self, event: &WidgetEvent) -> bool {
        let _ = event;
        true
    }

    /// Optional name for debugging.
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Registration handle for a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Registry for managing synchronous event subscribers.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: RwLock<HashMap<SubscriberId, Arc<dyn EventSubscriber>>>,
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscriber_count", &self.len())
            .finish()
    }
}

impl SubscriberRegistry {
    /// Create a new subscriber registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber.
    ///
    /// Returns a handle that can be used to unregister the subscriber.
    pub fn register(&self, subscriber: Arc<dyn EventSubscriber>) -> SubscriberId {
        let id = SubscriberId::new();
        let name = subscriber.name().to_string();

        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, subscriber);

        debug!(subscriber_name = %name, "Subscriber registered");
        id
    }

    /// Unregister a subscriber.
    ///
    /// Returns `true` if the subscriber was found and removed.
    pub fn unregister(&self, id: SubscriberId) -> bool {
        // Drop the subscriber after the lock is released.
        let removed = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);

        if removed.is_some() {
            debug!("Subscriber unregistered");
            true
        } else {
            false
        }
    }

    /// Notify all accepting subscribers of an event.
    ///
    /// A panicking subscriber is logged and skipped; the others are still
    /// notified.
    pub fn notify(&self, event: &WidgetEvent, bus: &EventBus) {
        // Snapshot under the lock so subscribers may (un)register or
        // publish re-entrantly.
        let subscribers: Vec<(SubscriberId, Arc<dyn EventSubscriber>)> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, sub)| (*id, Arc::clone(sub)))
            .collect();

        for (id, subscriber) in subscribers {
            if !subscriber.accepts(event) {
                continue;
            }

            trace!(
                subscriber_name = %subscriber.name(),
                event_type = %event.event_type(),
                "Notifying subscriber"
            );

            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                subscriber.on_event(event, bus);
            }));

            if let Err(e) = result {
                warn!(
                    subscriber_id = ?id,
                    subscriber_name = %subscriber.name(),
                    error = ?e,
                    "Subscriber panicked"
                );
            }
        }
    }

    /// Get the number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all subscribers.
    pub fn clear(&self) {
        let drained: Vec<_> = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        drop(drained);
        debug!("All subscribers cleared");
    }
}

/// A simple closure-based subscriber with an optional filter.
pub struct FilterSubscriber<F>
where
    F: Fn(&WidgetEvent) + Send + Sync,
{
    name: String,
    filter: Option<EventFilter>,
    handler: F,
}

impl<F> FilterSubscriber<F>
where
    F: Fn(&WidgetEvent) + Send + Sync,
{
    /// Create a new filter subscriber.
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            filter: None,
            handler,
        }
    }

    /// Add a filter to this subscriber.
    #[must_use]
    pub fn with_filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&WidgetEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }
}

impl<F> EventSubscriber for FilterSubscriber<F>
where
    F: Fn(&WidgetEvent) + Send + Sync,
{
    fn on_event(&self, event: &WidgetEvent, _bus: &EventBus) {
        (self.handler)(event);
    }

    fn accepts(&self, event: &WidgetEvent) -> bool {
        match &self.filter {
            Some(f) => f(event),
            None => true,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
