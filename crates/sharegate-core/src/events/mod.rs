//! Domain events emitted by ShareGate operations.
//!
//! Backends record these for audit consumers; the editing session itself
//! never depends on them.

pub mod share;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use share::ShareEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The principal who caused the event (if known).
    pub actor_id: Option<String>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A share-related event.
    Share(ShareEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Shorthand for wrapping a share event.
    pub fn share(actor_id: Option<String>, event: ShareEvent) -> Self {
        Self::new(actor_id, EventPayload::Share(event))
    }

    /// The share event carried by this envelope, if any.
    pub fn as_share(&self) -> Option<&ShareEvent> {
        match &self.payload {
            EventPayload::Share(event) => Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagging() {
        let event = DomainEvent::share(
            Some("alice".to_string()),
            ShareEvent::Committed {
                resource_type: "document".to_string(),
                resource_id: "doc-1".to_string(),
                upserts: 1,
                revokes: 0,
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["payload"]["domain"], "Share");
        assert_eq!(json["payload"]["event"]["type"], "Committed");
        assert!(event.as_share().is_some());
    }

    #[test]
    fn test_event_ids_are_time_ordered() {
        let event = DomainEvent::share(None, ShareEvent::Committed {
            resource_type: "document".to_string(),
            resource_id: "doc-1".to_string(),
            upserts: 0,
            revokes: 1,
        });
        assert_eq!(event.id.get_version_num(), 7);
    }
}
