//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Dotted type name, as returned by [`DomainEvent::event_type`].
    pub event_type: String,
    /// Key of the chapter that produced the event.
    pub chapter_key: String,
    /// Monotonically increasing number within the chapter's event stream.
    pub sequence_number: i64,
    /// Correlation ID of the command that caused this event, or that started
    /// the playback whose timer produced it.
    pub correlation_id: Uuid,
    /// Timestamp of event creation. Timer-driven events carry the deadline
    /// that fired, not the moment the host noticed it.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Metadata for a fresh event with a new id.
    #[must_use]
    pub fn new(
        event_type: &str,
        chapter_key: &str,
        sequence_number: i64,
        correlation_id: Uuid,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            chapter_key: chapter_key.to_owned(),
            sequence_number,
            correlation_id,
            occurred_at,
        }
    }
}

/// A recorded change to a chapter's playback.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `chapter.step_entered`.
    fn event_type(&self) -> &'static str;

    /// The event-specific fields as JSON.
    fn to_payload(&self) -> serde_json::Value;

    fn metadata(&self) -> &EventMetadata;
}
