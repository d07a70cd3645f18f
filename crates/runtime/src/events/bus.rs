//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{IntentEvent, SnapshotEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Intent dispatch, confirmation, and failure
    Intent,
    /// Snapshot refreshes
    Snapshot,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Intent, Topic::Snapshot];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Intent(IntentEvent),
    Snapshot(SnapshotEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Intent(_) => Topic::Intent,
            Event::Snapshot(_) => Topic::Snapshot,
        }
    }
}

impl From<IntentEvent> for Event {
    fn from(event: IntentEvent) -> Self {
        Event::Intent(event)
    }
}

impl From<SnapshotEvent> for Event {
    fn from(event: SnapshotEvent) -> Self {
        Event::Snapshot(event)
    }
}

#[derive(Debug)]
struct Channels {
    intent: broadcast::Sender<Event>,
    snapshot: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events are dropped when
/// a topic has no subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                intent: broadcast::channel(capacity).0,
                snapshot: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Intent => &self.channels.intent,
            Topic::Snapshot => &self.channels.snapshot,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut intents = bus.subscribe(Topic::Intent);
        let mut snapshots = bus.subscribe(Topic::Snapshot);

        bus.publish(SnapshotEvent::RefreshFailed {
            error: "offline".into(),
        });

        let event = snapshots.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Snapshot);
        assert!(intents.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(SnapshotEvent::Discarded {
            received: 1,
            current: 2,
        });
    }
}
