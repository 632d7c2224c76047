//! Platform broadcast routing.
//!
//! The platform delivers refreshes as broadcasts carrying an action id.
//! Each widget kind has its own refresh action, and both kinds also react
//! to the platform's generic update action. [`BroadcastRouter`] turns an
//! action into the kinds to refresh; [`DispatchSubscriber`] wires that to
//! the event bus.

use std::sync::Arc;

use tracing::{debug, trace};

use marin_core::WidgetKind;
use marin_events::{EventBus, EventMetadata, EventSubscriber, SubscriberId, WidgetEvent};

use crate::dispatcher::WidgetDispatcher;

/// Default refresh action of the vessel widget.
pub const DEFAULT_VESSEL_REFRESH_ACTION: &str = "com.example.marin.REFRESH_VESSEL_WIDGET";

/// Default refresh action of the alert history widget.
pub const DEFAULT_ALERT_REFRESH_ACTION: &str = "com.marin.rollperiod.REFRESH_ACTION";

/// The platform's generic widget update action.
pub const DEFAULT_UPDATE_ACTION: &str = "android.appwidget.action.APPWIDGET_UPDATE";

/// Maps broadcast actions to widget kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRouter {
    vessel_action: String,
    alert_action: String,
    update_action: String,
}

impl BroadcastRouter {
    /// Create a router from the three action ids.
    pub fn new(
        vessel_action: impl Into<String>,
        alert_action: impl Into<String>,
        update_action: impl Into<String>,
    ) -> Self {
        Self {
            vessel_action: vessel_action.into(),
            alert_action: alert_action.into(),
            update_action: update_action.into(),
        }
    }

    /// The custom refresh action of `kind`.
    #[must_use]
    pub fn refresh_action(&self, kind: WidgetKind) -> &str {
        match kind {
            WidgetKind::Vessel => &self.vessel_action,
            WidgetKind::AlertHistory => &self.alert_action,
        }
    }

    /// The generic update action.
    #[must_use]
    pub fn update_action(&self) -> &str {
        &self.update_action
    }

    /// Kinds to refresh for a broadcast.
    ///
    /// A kind's own refresh action selects that kind whatever the target
    /// says. The generic update action selects its target, or every kind
    /// when it has none. Unknown actions select nothing.
    #[must_use]
    pub fn resolve(&self, action: &str, target: Option<WidgetKind>) -> Vec<WidgetKind> {
        if let Some(kind) = WidgetKind::ALL
            .into_iter()
            .find(|kind| self.refresh_action(*kind) == action)
        {
            return vec![kind];
        }

        if action == self.update_action {
            return match target {
                Some(kind) => vec![kind],
                None => WidgetKind::ALL.to_vec(),
            };
        }

        trace!(action = %action, "Ignoring unrelated broadcast");
        Vec::new()
    }
}

impl Default for BroadcastRouter {
    fn default() -> Self {
        Self::new(
            DEFAULT_VESSEL_REFRESH_ACTION,
            DEFAULT_ALERT_REFRESH_ACTION,
            DEFAULT_UPDATE_ACTION,
        )
    }
}

/// Event subscriber that refreshes widgets on platform broadcasts.
///
/// Every routed kind is dispatched inline on the publishing thread, then a
/// [`WidgetEvent::DispatchCompleted`] is published with the broadcast's
/// event id as correlation id.
#[derive(Debug)]
pub struct DispatchSubscriber {
    router: BroadcastRouter,
    dispatcher: WidgetDispatcher,
}

impl DispatchSubscriber {
    /// Source name stamped on the events this subscriber publishes.
    pub const SOURCE: &'static str = "dispatcher";

    /// Create a subscriber.
    #[must_use]
    pub fn new(router: BroadcastRouter, dispatcher: WidgetDispatcher) -> Self {
        Self { router, dispatcher }
    }

    /// Register a new subscriber on `bus`.
    pub fn attach(
        bus: &EventBus,
        router: BroadcastRouter,
        dispatcher: WidgetDispatcher,
    ) -> SubscriberId {
        bus.registry()
            .register(Arc::new(Self::new(router, dispatcher)))
    }
}

impl EventSubscriber for DispatchSubscriber {
    fn accepts(&self, event: &WidgetEvent) -> bool {
        matches!(event, WidgetEvent::Broadcast { .. })
    }

    fn on_event(&self, event: &WidgetEvent, bus: &EventBus) {
        let WidgetEvent::Broadcast {
            metadata,
            action,
            target,
        } = event
        else {
            return;
        };

        let kinds = self.router.resolve(action, *target);
        if kinds.is_empty() {
            return;
        }

        debug!(action = %action, kinds = ?kinds, "Broadcast routed");

        for kind in kinds {
            let report = self.dispatcher.dispatch(kind);
            let failed = report.failed_ids();
            bus.publish(WidgetEvent::DispatchCompleted {
                metadata: EventMetadata::new(Self::SOURCE).with_correlation_id(metadata.event_id),
                kind,
                rendered: report.rendered,
                failed,
            });
        }
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "dispatch"
    }
}
