//! Host command channel.
//!
//! The host application asks for a refresh by invoking a named method on a
//! named channel. Each widget kind is bound to one `(channel, method)`
//! pair; calls carry no arguments.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use marin_core::WidgetKind;

use crate::dispatcher::{DispatchReport, WidgetDispatcher};

/// Default channel and method for the vessel widget.
pub const DEFAULT_VESSEL_COMMAND: (&str, &str) =
    ("com.marin.rollperiod/vessel_widget", "updateVesselWidget");

/// Default channel and method for the alert history widget.
pub const DEFAULT_ALERT_HISTORY_COMMAND: (&str, &str) =
    ("com.marin.rollperiod/widget", "updateWidget");

/// A method invocation from the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodCall {
    /// Channel name.
    pub channel: String,
    /// Method name.
    pub method: String,
}

impl MethodCall {
    /// Create a method call.
    pub fn new(channel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            method: method.into(),
        }
    }
}

/// Response returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResponse {
    /// The call was handled.
    Success,
    /// No handler is bound to the call.
    NotImplemented,
}

/// Binds host method calls to refreshes.
#[derive(Debug, Clone)]
pub struct CommandChannel {
    bindings: Vec<(MethodCall, WidgetKind)>,
    dispatcher: WidgetDispatcher,
}

impl CommandChannel {
    /// Create a channel with no bindings.
    #[must_use]
    pub fn new(dispatcher: WidgetDispatcher) -> Self {
        Self {
            bindings: Vec::new(),
            dispatcher,
        }
    }

    /// Create a channel with the default bindings for both kinds.
    #[must_use]
    pub fn with_default_bindings(dispatcher: WidgetDispatcher) -> Self {
        let (vessel_channel, vessel_method) = DEFAULT_VESSEL_COMMAND;
        let (alert_channel, alert_method) = DEFAULT_ALERT_HISTORY_COMMAND;
        Self::new(dispatcher)
            .bind(MethodCall::new(vessel_channel, vessel_method), WidgetKind::Vessel)
            .bind(
                MethodCall::new(alert_channel, alert_method),
                WidgetKind::AlertHistory,
            )
    }

    /// Bind `call` to a refresh of `kind`, replacing any earlier binding of
    /// the same call.
    #[must_use]
    pub fn bind(mut self, call: MethodCall, kind: WidgetKind) -> Self {
        self.bindings.retain(|(bound, _)| *bound != call);
        self.bindings.push((call, kind));
        self
    }

    /// The kind bound to `call`, if any.
    #[must_use]
    pub fn resolve(&self, call: &MethodCall) -> Option<WidgetKind> {
        self.bindings
            .iter()
            .find_map(|(bound, kind)| (bound == call).then_some(*kind))
    }

    /// Handle a host call.
    ///
    /// A bound call refreshes its kind and succeeds even if some instances
    /// failed to render. Unbound calls dispatch nothing.
    pub fn handle(&self, call: &MethodCall) -> CommandResponse {
        self.handle_with_report(call).0
    }

    /// Like [`handle`](Self::handle), also returning the dispatch report
    /// when a refresh ran.
    pub fn handle_with_report(
        &self,
        call: &MethodCall,
    ) -> (CommandResponse, Option<DispatchReport>) {
        let Some(kind) = self.resolve(call) else {
            debug!(
                channel = %call.channel,
                method = %call.method,
                "No handler for method call"
            );
            return (CommandResponse::NotImplemented, None);
        };

        info!(
            channel = %call.channel,
            method = %call.method,
            kind = %kind,
            "Refresh requested by host"
        );
        let report = self.dispatcher.dispatch(kind);
        (CommandResponse::Success, Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RenderError, RenderResult};
    use crate::registry::InstanceRegistry;
    use crate::surface::Renderer;
    use marin_core::{SlotSet, WidgetInstanceId};
    use marin_storage::MemorySnapshotStore;
    use std::sync::{Arc, Mutex};

    struct Everywhere;

    impl InstanceRegistry for Everywhere {
        fn instances(&self, _kind: WidgetKind) -> Vec<WidgetInstanceId> {
            vec![WidgetInstanceId::new(1), WidgetInstanceId::new(2)]
        }
    }

    #[derive(Default)]
    struct FailingSecond(Mutex<Vec<WidgetKind>>);

    impl Renderer for FailingSecond {
        fn render(&self, instance: WidgetInstanceId, slots: &SlotSet) -> RenderResult<()> {
            self.0.lock().unwrap().push(slots.kind());
            if instance.get() == 2 {
                return Err(RenderError::Platform("surface gone".into()));
            }
            Ok(())
        }
    }

    fn channel() -> (CommandChannel, Arc<FailingSecond>) {
        let renderer = Arc::new(FailingSecond::default());
        let dispatcher = WidgetDispatcher::new(
            Arc::new(MemorySnapshotStore::new()),
            Arc::new(Everywhere),
            Arc::clone(&renderer) as Arc<dyn Renderer>,
        );
        (CommandChannel::with_default_bindings(dispatcher), renderer)
    }

    #[test]
    fn test_bound_calls_dispatch_their_kind() {
        let (channel, renderer) = channel();

        let call = MethodCall::new("com.marin.rollperiod/widget", "updateWidget");
        let (response, report) = channel.handle_with_report(&call);
        assert_eq!(response, CommandResponse::Success);
        let report = report.unwrap();
        assert_eq!(report.kind, WidgetKind::AlertHistory);
        assert_eq!(report.failed_ids(), vec![WidgetInstanceId::new(2)]);

        let call = MethodCall::new("com.marin.rollperiod/vessel_widget", "updateVesselWidget");
        assert_eq!(channel.handle(&call), CommandResponse::Success);

        assert_eq!(
            *renderer.0.lock().unwrap(),
            vec![
                WidgetKind::AlertHistory,
                WidgetKind::AlertHistory,
                WidgetKind::Vessel,
                WidgetKind::Vessel
            ]
        );
    }

    #[test]
    fn test_unbound_calls_are_not_implemented() {
        let (channel, renderer) = channel();

        let wrong_method = MethodCall::new("com.marin.rollperiod/widget", "updateVesselWidget");
        let wrong_channel = MethodCall::new("com.marin.rollperiod/other", "updateWidget");
        assert_eq!(channel.handle(&wrong_method), CommandResponse::NotImplemented);
        assert_eq!(
            channel.handle_with_report(&wrong_channel),
            (CommandResponse::NotImplemented, None)
        );
        assert!(renderer.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rebinding_replaces_kind() {
        let (channel, _) = channel();
        let call = MethodCall::new("com.marin.rollperiod/widget", "updateWidget");
        let channel = channel.bind(call.clone(), WidgetKind::Vessel);
        assert_eq!(channel.resolve(&call), Some(WidgetKind::Vessel));
    }
}
