//! Topic-based event bus implementation.

use std::collections::HashMap;

use game_core::StoreChange;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::ActionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Every store mutation, effect queues included
    Store,
    /// Action lifecycle (begun, committed, failed)
    Action,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Store(StoreChange),
    Action(ActionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Store(_) => Topic::Store,
            Event::Action(_) => Topic::Action,
        }
    }
}

/// Topic-based event bus
///
/// Every topic owns a broadcast channel created up front, so publishing and
/// subscribing never wait on a lock.
#[derive(Clone)]
pub struct EventBus {
    store: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Store => &self.store,
            Topic::Action => &self.action,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
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
