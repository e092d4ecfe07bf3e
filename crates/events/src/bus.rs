//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`PlatformEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use clientpulse_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the platform.
///
/// Constructed via [`PlatformEvent::new`] and enriched with the builder
/// methods [`with_project`](PlatformEvent::with_project),
/// [`with_source`](PlatformEvent::with_source), and
/// [`with_payload`](PlatformEvent::with_payload).
///
/// Events carry only row references; consumers that need joined data
/// (e.g. a message with its author name) re-fetch the row themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"message.created"`.
    pub event_type: String,

    /// The project this event is scoped to, when applicable. Drives
    /// per-project WebSocket fan-out.
    pub project_id: Option<DbId>,

    /// Optional source entity kind (e.g. `"message"`, `"invoice"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            project_id: None,
            source_entity_type: None,
            source_entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Scope the event to a project.
    pub fn with_project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`PlatformEvent`].
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: PlatformEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = PlatformEvent::new("message.created")
            .with_project(3)
            .with_source("message", 42)
            .with_payload(serde_json::json!({"content_len": 11}));
        bus.publish(event);

        let received = rx.recv().await.expect("event should be delivered");
        assert_eq!(received.event_type, "message.created");
        assert_eq!(received.project_id, Some(3));
        assert_eq!(received.source_entity_type.as_deref(), Some("message"));
        assert_eq!(received.source_entity_id, Some(42));
        assert_eq!(received.payload["content_len"], 11);
    }

    #[tokio::test]
    async fn every_subscriber_receives_every_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PlatformEvent::new("invoice.overdue"));

        assert_eq!(rx1.recv().await.unwrap().event_type, "invoice.overdue");
        assert_eq!(rx2.recv().await.unwrap().event_type, "invoice.overdue");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let bus = EventBus::default();
        // Must not panic or error.
        bus.publish(PlatformEvent::new("message.created"));
    }

    #[tokio::test]
    async fn events_are_received_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        for i in 0..5 {
            bus.publish(PlatformEvent::new("message.created").with_source("message", i));
        }

        for i in 0..5 {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.source_entity_id, Some(i));
        }
    }
}
