//! Platform broadcasts routed through the event bus to the dispatcher.

mod common;

use common::FilePipeline;
use marin_core::{WidgetInstanceId, WidgetKind};
use marin_dispatch::{
    BroadcastRouter, DEFAULT_ALERT_REFRESH_ACTION, DEFAULT_UPDATE_ACTION,
    DEFAULT_VESSEL_REFRESH_ACTION, DispatchSubscriber,
};
use marin_events::{EventBus, WidgetEvent};
use marin_test::{
    ALERT_HISTORY_KEY, RecordingHost, VESSEL_KEY, alert_history_json, init_test_logging,
    vessel_snapshot_json,
};

/// A pipeline with one vessel widget (#1) and one alert widget (#2), both
/// with data, attached to a fresh bus.
fn attached() -> (FilePipeline, EventBus) {
    attached_with(RecordingHost::new())
}

fn attached_with(host: RecordingHost) -> (FilePipeline, EventBus) {
    init_test_logging();
    let mut pipeline = FilePipeline::with_host(host);
    pipeline.place(WidgetKind::Vessel, &[1]);
    pipeline.place(WidgetKind::AlertHistory, &[2]);
    pipeline.prefs.set(VESSEL_KEY, vessel_snapshot_json()).unwrap();
    pipeline.prefs.set(ALERT_HISTORY_KEY, alert_history_json(1)).unwrap();

    let bus = EventBus::new();
    DispatchSubscriber::attach(&bus, BroadcastRouter::default(), pipeline.dispatcher.clone());
    (pipeline, bus)
}

fn rendered_instances(pipeline: &FilePipeline) -> Vec<i32> {
    pipeline
        .host
        .applied()
        .iter()
        .map(|(id, _)| id.get())
        .collect()
}

#[tokio::test]
async fn custom_action_refreshes_its_kind_only() {
    let (pipeline, bus) = attached();

    bus.publish(WidgetEvent::broadcast("platform", DEFAULT_VESSEL_REFRESH_ACTION, None));
    assert_eq!(rendered_instances(&pipeline), vec![1]);

    // The custom action wins over a mismatched target.
    bus.publish(WidgetEvent::broadcast(
        "platform",
        DEFAULT_ALERT_REFRESH_ACTION,
        Some(WidgetKind::Vessel),
    ));
    assert_eq!(rendered_instances(&pipeline), vec![1, 2]);
}

#[tokio::test]
async fn generic_update_follows_target() {
    let (pipeline, bus) = attached();

    bus.publish(WidgetEvent::broadcast(
        "platform",
        DEFAULT_UPDATE_ACTION,
        Some(WidgetKind::AlertHistory),
    ));
    assert_eq!(rendered_instances(&pipeline), vec![2]);

    bus.publish(WidgetEvent::broadcast("platform", DEFAULT_UPDATE_ACTION, None));
    assert_eq!(rendered_instances(&pipeline), vec![2, 1, 2]);
}

#[tokio::test]
async fn unrelated_broadcast_is_ignored() {
    let (pipeline, bus) = attached();
    let mut receiver = bus.subscribe();

    bus.publish(WidgetEvent::broadcast(
        "platform",
        "android.intent.action.BATTERY_LOW",
        Some(WidgetKind::Vessel),
    ));

    assert!(pipeline.host.attempts().is_empty());
    let event = receiver.recv().await.unwrap();
    assert_eq!(event.event_type(), "broadcast");
    assert!(receiver.try_recv().is_none());
}

#[tokio::test]
async fn completion_events_report_each_kind() {
    let (_pipeline, bus) = attached_with(RecordingHost::new().with_stale_instance(2));
    let mut completions = bus.subscribe_kind(WidgetKind::AlertHistory);
    let mut all = bus.subscribe();

    let broadcast = WidgetEvent::broadcast("platform", DEFAULT_UPDATE_ACTION, None);
    let broadcast_id = broadcast.metadata().event_id;
    bus.publish(broadcast);

    // Broadcast first, then one completion per kind in stable order.
    let mut seen = Vec::new();
    while let Some(event) = all.try_recv() {
        seen.push(event.event_type());
    }
    assert_eq!(
        seen,
        vec!["broadcast", "dispatch_completed", "dispatch_completed"]
    );

    let event = completions.recv().await.unwrap();
    let WidgetEvent::DispatchCompleted {
        metadata,
        kind,
        rendered,
        failed,
    } = event.as_ref()
    else {
        panic!("expected a completion, got {event:?}");
    };
    assert_eq!(*kind, WidgetKind::AlertHistory);
    assert!(rendered.is_empty());
    assert_eq!(failed, &vec![WidgetInstanceId::new(2)]);
    assert_eq!(metadata.correlation_id, Some(broadcast_id));
    assert_eq!(metadata.source, DispatchSubscriber::SOURCE);
}

#[tokio::test]
async fn custom_router_actions() {
    init_test_logging();
    let mut pipeline = FilePipeline::new();
    pipeline.place(WidgetKind::Vessel, &[1]);
    pipeline.prefs.set(VESSEL_KEY, vessel_snapshot_json()).unwrap();

    let bus = EventBus::new();
    let router = BroadcastRouter::new("app.VESSEL", "app.ALERTS", "app.UPDATE");
    DispatchSubscriber::attach(&bus, router, pipeline.dispatcher.clone());

    bus.publish(WidgetEvent::broadcast("platform", DEFAULT_VESSEL_REFRESH_ACTION, None));
    assert!(pipeline.host.attempts().is_empty());

    bus.publish(WidgetEvent::broadcast("platform", "app.VESSEL", None));
    assert_eq!(rendered_instances(&pipeline), vec![1]);
}
