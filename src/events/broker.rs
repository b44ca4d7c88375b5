use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A named occurrence with an arbitrary JSON payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub payload: Value,
}

impl Event {
    /// An event without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Value::Null,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Receives published events.
pub trait Subscriber: Send + Sync {
    fn handle(&self, event: &Event);
}

impl<F> Subscriber for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn handle(&self, event: &Event) {
        self(event)
    }
}

/// Delivers events to the subscribers registered for their name.
#[derive(Default)]
pub struct EventBroker {
    subscribers: RwLock<HashMap<String, Vec<Arc<dyn Subscriber>>>>,
}

impl EventBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<S>(&self, event_name: impl Into<String>, subscriber: S)
    where
        S: Subscriber + 'static,
    {
        let event_name = event_name.into();
        debug!(event = %event_name, "subscriber added");
        self.subscribers
            .write()
            .entry(event_name)
            .or_default()
            .push(Arc::new(subscriber));
    }

    /// Calls every subscriber of `event.name` in subscription order and
    /// returns how many were called.
    ///
    /// The subscriber list is snapshotted first, so handlers may subscribe
    /// or publish themselves; a subscriber added during delivery only sees
    /// later events.
    pub fn publish(&self, event: &Event) -> usize {
        let subscribers = match self.subscribers.read().get(&event.name) {
            Some(list) => list.clone(),
            None => return 0,
        };

        debug!(event = %event.name, subscribers = subscribers.len(), "publishing");
        for subscriber in &subscribers {
            subscriber.handle(event);
        }
        subscribers.len()
    }

    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscribers
            .read()
            .get(event_name)
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscribers = self.subscribers.read();
        let mut counts: Vec<(&String, usize)> =
            subscribers.iter().map(|(name, list)| (name, list.len())).collect();
        counts.sort();
        f.debug_struct("EventBroker").field("subscribers", &counts).finish()
    }
}
