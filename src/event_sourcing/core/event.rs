use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use anyhow::Result;

// ============================================================================
// Event Envelope - event metadata for publishing and replay
// ============================================================================
//
// Wraps a domain event with identity, ordering and tracing metadata.
// Generic over the payload type.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,
    pub aggregate_id: Uuid,
    pub sequence_number: i64,

    // Event Type Information
    pub event_type: String,
    pub event_version: i32,

    // Event Payload
    pub event_data: E,

    // Correlation
    pub correlation_id: Uuid,

    pub timestamp: DateTime<Utc>,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        aggregate_id: Uuid,
        sequence_number: i64,
        event_type: impl Into<String>,
        event_data: E,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            aggregate_id,
            sequence_number,
            event_type: event_type.into(),
            event_version: 1,
            event_data,
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct Ping {
        seq: u32,
    }

    #[test]
    fn test_envelope_carries_metadata() {
        let aggregate_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();

        let envelope = EventEnvelope::new(aggregate_id, 7, "Ping", Ping { seq: 1 }, correlation_id);

        assert_eq!(envelope.aggregate_id, aggregate_id);
        assert_eq!(envelope.sequence_number, 7);
        assert_eq!(envelope.event_type, "Ping");
        assert_eq!(envelope.event_version, 1);
        assert_eq!(envelope.correlation_id, correlation_id);
        assert_eq!(envelope.event_id.get_version_num(), 7);
    }

    #[test]
    fn test_envelope_json_keeps_payload() {
        let envelope = EventEnvelope::new(Uuid::new_v4(), 1, "Ping", Ping { seq: 42 }, Uuid::new_v4());

        let json = serialize_event(&envelope).unwrap();
        let restored: EventEnvelope<Ping> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, envelope);
        assert!(json.contains("\"event_data\":{\"seq\":42}"));
    }
}
