use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::event_sourcing::{Aggregate, EventEnvelope};
use crate::messaging::{NotificationEnvelope, NotificationPublisher};
use crate::metrics::Metrics;

use super::aggregate::{Registry, RegistrySummary};
use super::errors::RegistryError;
use super::events::{RegistrationNotification, RegistryEvent};
use super::value_objects::{ParticipantId, ParticipantProfile, ParticipantRecord, ParticipationType};

// ============================================================================
// Registry Command Handler
// ============================================================================
//
// Orchestrates: Command -> Registry (under the write lock) -> Events ->
// Notifications
//
// Every mutating command holds the write lock from validation through
// application, so a capacity check and the insertion it guards are one step
// for every other caller. Queries share the read lock.
//
// Notifications are queued before the write lock is released, so the queue
// holds them in commit order. A single delivery task drains the queue and
// publishes one notification at a time. A delivery failure is logged and
// counted, never surfaced or rolled back.
//
// ============================================================================

pub struct RegistryService {
    registry: RwLock<Registry>,
    notifications: mpsc::UnboundedSender<NotificationEnvelope>,
    publisher_name: &'static str,
    metrics: Arc<Metrics>,
}

impl RegistryService {
    /// Create a fresh registry owned by `organizer`.
    ///
    /// Must be called from within a Tokio runtime: the notification delivery
    /// task is spawned here.
    pub fn new(
        organizer: ParticipantId,
        publisher: Arc<dyn NotificationPublisher>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let (registry, _) = Registry::create(organizer);
        Self::from_registry(registry, publisher, metrics)
    }

    /// Serve an existing registry, e.g. one rebuilt with `load_from_events`.
    pub fn from_registry(
        registry: Registry,
        publisher: Arc<dyn NotificationPublisher>,
        metrics: Arc<Metrics>,
    ) -> Self {
        tracing::info!(
            registry_id = %registry.aggregate_id(),
            organizer = %registry.organizer(),
            minimum_age = registry.minimum_age(),
            capacity = registry.capacity(),
            publisher = publisher.name(),
            "Registry ready"
        );

        metrics.record_minimum_age(registry.minimum_age());
        metrics.registered_participants.set(registry.total() as i64);

        let publisher_name = publisher.name();
        let (notifications, queue) = mpsc::unbounded_channel();
        tokio::spawn(deliver_notifications(publisher, metrics.clone(), queue));

        Self {
            registry: RwLock::new(registry),
            notifications,
            publisher_name,
            metrics,
        }
    }

    /// Run `apply` under the write lock, then log its events and record
    /// metrics. Rejections are logged and counted before being returned.
    async fn run<T>(
        &self,
        command: &'static str,
        caller: ParticipantId,
        apply: impl FnOnce(&mut Registry) -> Result<(Vec<RegistryEvent>, T), RegistryError>,
    ) -> Result<T, RegistryError> {
        let started = Instant::now();
        let mut registry = self.registry.write().await;
        let result = apply(&mut *registry);
        self.metrics
            .observe_command(command, started.elapsed().as_secs_f64());

        match result {
            Ok((events, value)) => {
                for event in &events {
                    tracing::info!(
                        registry_id = %registry.aggregate_id(),
                        version = registry.version(),
                        event = event.name(),
                        caller = %caller,
                        total = registry.total(),
                        "Registry event applied"
                    );
                }
                self.metrics.record_minimum_age(registry.minimum_age());
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(command, caller = %caller, error = %e, "Command rejected");
                self.metrics.record_rejection(command, e.reason());
                Err(e)
            }
        }
    }

    // Called with the write lock held, right after the registration that
    // produced `notification` was applied.
    fn enqueue(
        &self,
        registry: &Registry,
        notification: &RegistrationNotification,
        correlation_id: Uuid,
    ) {
        self.metrics
            .record_registration(notification.kind.as_str(), registry.total());

        let envelope = EventEnvelope::new(
            registry.aggregate_id(),
            registry.version(),
            notification.kind.as_str(),
            notification.clone(),
            correlation_id,
        );

        if let Err(e) = self.notifications.send(envelope) {
            tracing::warn!(
                publisher = self.publisher_name,
                caller = %e.0.event_data.caller,
                "Notification queue closed, dropping notification"
            );
            self.metrics.record_notification_failure(self.publisher_name);
        }
    }

    // Commands

    pub async fn set_minimum_age(
        &self,
        caller: ParticipantId,
        new_floor: u8,
    ) -> Result<(), RegistryError> {
        self.run("set_minimum_age", caller, |registry| {
            let events = registry.set_minimum_age(caller, new_floor)?;
            Ok((events, ()))
        })
        .await
    }

    /// Register the caller or replace their whole record, returning the
    /// notification that was emitted.
    pub async fn register_or_update(
        &self,
        caller: ParticipantId,
        profile: ParticipantProfile,
    ) -> Result<RegistrationNotification, RegistryError> {
        let correlation_id = Uuid::new_v4();

        self.run("register_or_update", caller, |registry| {
            let (event, notification) = registry.register_or_update(caller, profile)?;
            self.enqueue(registry, &notification, correlation_id);
            Ok((vec![event], notification))
        })
        .await
    }

    // Queries

    pub async fn get(&self, id: ParticipantId) -> Result<ParticipantRecord, RegistryError> {
        let result = self.registry.read().await.get(id);
        tracing::debug!(participant_id = %id, found = result.is_ok(), "Participant lookup");
        result
    }

    pub async fn is_registered(&self, id: ParticipantId) -> bool {
        self.registry.read().await.is_registered(id)
    }

    pub async fn total(&self) -> usize {
        self.registry.read().await.total()
    }

    pub async fn count_by_participation_type(&self, participation_type: ParticipationType) -> usize {
        self.registry
            .read()
            .await
            .count_by_participation_type(participation_type)
    }

    pub async fn summary(&self) -> RegistrySummary {
        self.registry.read().await.summary()
    }

    pub async fn minimum_age(&self) -> u8 {
        self.registry.read().await.minimum_age()
    }

    pub async fn organizer(&self) -> ParticipantId {
        self.registry.read().await.organizer()
    }
}

/// Publish queued notifications one at a time until every sender is gone.
async fn deliver_notifications(
    publisher: Arc<dyn NotificationPublisher>,
    metrics: Arc<Metrics>,
    mut queue: mpsc::UnboundedReceiver<NotificationEnvelope>,
) {
    while let Some(envelope) = queue.recv().await {
        if let Err(e) = publisher.publish(&envelope).await {
            tracing::warn!(
                publisher = publisher.name(),
                event_id = %envelope.event_id,
                caller = %envelope.event_data.caller,
                error = %e,
                "Notification delivery failed"
            );
            metrics.record_notification_failure(publisher.name());
        }
    }

    tracing::debug!(publisher = publisher.name(), "Notification queue closed");
}

// ============================================================================
// Unit Tests
// ============================================================================
