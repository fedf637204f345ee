// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry};

pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// - registrations and updates by kind
// - rejected commands by reason
// - registry occupancy and the current eligibility floor
// - notification delivery failures by publisher, and the broker circuit state
// - command latency
//
// Everything is registered on a private Prometheus registry and scraped via
// /metrics.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub registrations_total: IntCounterVec,
    pub rejections_total: IntCounterVec,
    pub registered_participants: IntGauge,
    pub minimum_age: IntGauge,
    pub notification_failures: IntCounterVec,
    pub notification_circuit_state: IntGauge,
    pub command_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let registrations_total = IntCounterVec::new(
            Opts::new("registry_registrations_total", "Successful registrations and updates"),
            &["kind"],
        )?;
        registry.register(Box::new(registrations_total.clone()))?;

        let rejections_total = IntCounterVec::new(
            Opts::new("registry_rejections_total", "Commands rejected by a business rule"),
            &["command", "reason"],
        )?;
        registry.register(Box::new(rejections_total.clone()))?;

        let registered_participants = IntGauge::new(
            "registry_registered_participants",
            "Distinct registered participants",
        )?;
        registry.register(Box::new(registered_participants.clone()))?;

        let minimum_age = IntGauge::new("registry_minimum_age", "Current eligibility floor")?;
        registry.register(Box::new(minimum_age.clone()))?;

        let notification_failures = IntCounterVec::new(
            Opts::new(
                "registry_notification_failures_total",
                "Notifications that could not be delivered",
            ),
            &["publisher"],
        )?;
        registry.register(Box::new(notification_failures.clone()))?;

        let notification_circuit_state = IntGauge::new(
            "registry_notification_circuit_state",
            "Notification broker circuit breaker state (0=closed, 1=open, 2=half-open)",
        )?;
        registry.register(Box::new(notification_circuit_state.clone()))?;

        let command_duration = HistogramVec::new(
            HistogramOpts::new("registry_command_duration_seconds", "Time spent executing commands")
                .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]),
            &["command"],
        )?;
        registry.register(Box::new(command_duration.clone()))?;

        Ok(Self {
            registry,
            registrations_total,
            rejections_total,
            registered_participants,
            minimum_age,
            notification_failures,
            notification_circuit_state,
            command_duration,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_registration(&self, kind: &str, registered_participants: usize) {
        self.registrations_total.with_label_values(&[kind]).inc();
        self.registered_participants.set(registered_participants as i64);
    }

    pub fn record_rejection(&self, command: &str, reason: &str) {
        self.rejections_total.with_label_values(&[command, reason]).inc();
    }

    pub fn record_minimum_age(&self, minimum_age: u8) {
        self.minimum_age.set(i64::from(minimum_age));
    }

    pub fn record_notification_failure(&self, publisher: &str) {
        self.notification_failures.with_label_values(&[publisher]).inc();
    }

    pub fn record_circuit_state(&self, state: i64) {
        self.notification_circuit_state.set(state);
    }

    pub fn observe_command(&self, command: &str, duration_secs: f64) {
        self.command_duration.with_label_values(&[command]).observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CircuitState;

    fn counter_value(metrics: &Metrics, name: &str) -> Option<f64> {
        metrics
            .registry
            .gather()
            .iter()
            .find(|family| family.name() == name)
            .and_then(|family| family.metric[0].counter.value)
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_minimum_age(18);
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_registration_updates_gauge() {
        let metrics = Metrics::new().unwrap();
        metrics.record_registration("RegistrationAttempt", 1);
        metrics.record_registration("RegistrationAttempt", 2);

        assert_eq!(counter_value(&metrics, "registry_registrations_total"), Some(2.0));
        assert_eq!(metrics.registered_participants.get(), 2);
    }

    #[test]
    fn test_record_rejection_and_failures() {
        let metrics = Metrics::new().unwrap();
        metrics.record_rejection("register_or_update", "invalid_age");
        metrics.record_notification_failure("redpanda");

        assert_eq!(counter_value(&metrics, "registry_rejections_total"), Some(1.0));
        assert_eq!(counter_value(&metrics, "registry_notification_failures_total"), Some(1.0));
    }

    #[test]
    fn test_record_circuit_state() {
        let metrics = Metrics::new().unwrap();
        metrics.record_circuit_state(CircuitState::Open.as_gauge());
        assert_eq!(metrics.notification_circuit_state.get(), 1);

        metrics.record_circuit_state(CircuitState::HalfOpen.as_gauge());
        assert_eq!(metrics.notification_circuit_state.get(), 2);
    }
}
