//! Category-scoped change notification.
//!
//! Store mutators publish a typed event tagged with the affected clinical
//! category rather than a generic "anything changed" signal, so a consumer
//! watching only observations is not invalidated when a procedure lands.
//! Built on tokio's broadcast channel: multi-producer, multi-consumer, and
//! slow receivers drop the oldest events past the buffer.

use argonaut_core::ResourceCategory;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::broadcast;

/// Default buffer size for the broadcast channel.
const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Type of store change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreEventType {
    /// A resource was inserted
    Inserted,
    /// A resource was removed by id
    Removed,
    /// The whole collection was cleared
    Cleared,
}

impl StoreEventType {
    /// Returns the string representation of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreEventType::Inserted => "inserted",
            StoreEventType::Removed => "removed",
            StoreEventType::Cleared => "cleared",
        }
    }
}

impl std::fmt::Display for StoreEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event representing a change to the resource collection, scoped to one
/// clinical category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Type of change
    pub event_type: StoreEventType,
    /// Category the change affects
    pub category: ResourceCategory,
    /// Identifier of the affected resource (None for clears)
    pub resource_id: Option<String>,
    /// Timestamp of the event
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl StoreEvent {
    /// Create a new store event.
    pub fn new(
        event_type: StoreEventType,
        category: ResourceCategory,
        resource_id: Option<String>,
    ) -> Self {
        Self {
            event_type,
            category,
            resource_id,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Create an "inserted" event.
    pub fn inserted(category: ResourceCategory, resource_id: impl Into<String>) -> Self {
        Self::new(StoreEventType::Inserted, category, Some(resource_id.into()))
    }

    /// Create a "removed" event.
    pub fn removed(category: ResourceCategory, resource_id: impl Into<String>) -> Self {
        Self::new(StoreEventType::Removed, category, Some(resource_id.into()))
    }

    /// Create a "cleared" event for one category.
    pub fn cleared(category: ResourceCategory) -> Self {
        Self::new(StoreEventType::Cleared, category, None)
    }

    /// Check if this event matches a filter by category.
    pub fn matches_category(&self, filter: Option<ResourceCategory>) -> bool {
        match filter {
            Some(category) => self.category == category,
            None => true, // No filter means match all
        }
    }
}

/// Broadcaster for store events.
///
/// Thread-safe and cheap to clone; multiple subscribers receive every event
/// published after they subscribed.
#[derive(Clone)]
pub struct StoreBroadcaster {
    sender: broadcast::Sender<StoreEvent>,
}

impl StoreBroadcaster {
    /// Create a new broadcaster with default buffer size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new broadcaster with custom buffer size.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event; 0 when
    /// nobody is listening.
    pub fn send(&self, event: StoreEvent) -> usize {
        self.sender.send(event).unwrap_or_default()
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Check if there are any active subscribers.
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for StoreBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StoreBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBroadcaster")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
