//! Marin Events - event bus between the platform, the host and the widget pipeline.
//!
//! Platform broadcasts (periodic updates, explicit refresh actions) enter
//! the pipeline as [`WidgetEvent::Broadcast`]. The dispatcher subscribes
//! synchronously, refreshes the addressed widgets inline and publishes a
//! [`WidgetEvent::DispatchCompleted`] for anyone watching.
//!
//! # Example
//!
//! ```rust
//! use marin_core::WidgetKind;
//! use marin_events::{EventBus, WidgetEvent};
//!
//! let bus = EventBus::new();
//! let mut receiver = bus.subscribe();
//!
//! bus.publish(WidgetEvent::broadcast(
//!     "platform",
//!     "android.appwidget.action.APPWIDGET_UPDATE",
//!     Some(WidgetKind::Vessel),
//! ));
//!
//! let event = receiver.try_recv().unwrap();
//! assert_eq!(event.event_type(), "broadcast");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bus;
mod event;
mod subscriber;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, EventReceiver};
pub use event::{EventMetadata, WidgetEvent};
pub use subscriber::{
    EventFilter, EventSubscriber, FilterSubscriber, SubscriberId, SubscriberRegistry,
};
