// ============================================================================
// Messaging - outbound notification delivery
// ============================================================================
//
// The registry hands each notification to a `NotificationPublisher` after the
// state change is committed. Delivery is fire-and-forget: publishers report
// failures to the caller of `publish`, which only logs and counts them.
//
// ============================================================================

mod redpanda;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::participant::RegistrationNotification;
use crate::event_sourcing::EventEnvelope;

pub use redpanda::RedpandaPublisher;

pub type NotificationEnvelope = EventEnvelope<RegistrationNotification>;

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Short label for logs and metrics
    fn name(&self) -> &'static str;

    async fn publish(&self, envelope: &NotificationEnvelope) -> Result<()>;
}

/// Publisher that only writes notifications to the log.
///
/// Used when no broker is configured.
#[derive(Debug, Default, Clone)]
pub struct LoggingPublisher;

#[async_trait]
impl NotificationPublisher for LoggingPublisher {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, envelope: &NotificationEnvelope) -> Result<()> {
        let notification = &envelope.event_data;
        tracing::info!(
            event_id = %envelope.event_id,
            kind = notification.kind.as_str(),
            caller = %notification.caller,
            success = notification.success,
            message = %notification.message,
            "Registration notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::ParticipantId;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_logging_publisher_accepts_notifications() {
        let publisher = LoggingPublisher;
        let envelope = EventEnvelope::new(
            Uuid::new_v4(),
            2,
            "RegistrationAttempt",
            RegistrationNotification::attempt(ParticipantId::new()),
            Uuid::new_v4(),
        );

        assert_eq!(publisher.name(), "log");
        assert!(publisher.publish(&envelope).await.is_ok());
    }
}
