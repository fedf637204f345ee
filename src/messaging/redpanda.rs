use anyhow::{Context, Result};
use async_trait::async_trait;
use rdkafka::{
    config::ClientConfig,
    producer::{FutureProducer, FutureRecord},
};
use std::sync::Arc;
use std::time::Duration;

use crate::event_sourcing::serialize_event;
use crate::metrics::Metrics;
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
use super::{NotificationEnvelope, NotificationPublisher};

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes notifications as JSON to a Kafka-compatible topic, keyed by the
/// caller so each participant's notifications land on one partition. The
/// registry publishes one notification at a time in commit order, so that
/// partition sees them in order.
pub struct RedpandaPublisher {
    producer: FutureProducer,
    topic: String,
    circuit_breaker: CircuitBreaker,
    metrics: Arc<Metrics>,
}

impl RedpandaPublisher {
    pub fn new(brokers: &str, topic: impl Into<String>, metrics: Arc<Metrics>) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .context("Failed to create Redpanda producer")?;

        metrics.record_circuit_state(CircuitState::Closed.as_gauge());

        Ok(Self {
            producer,
            topic: topic.into(),
            circuit_breaker: CircuitBreaker::new(CircuitBreakerConfig::default()),
            metrics,
        })
    }
}

#[async_trait]
impl NotificationPublisher for RedpandaPublisher {
    fn name(&self) -> &'static str {
        "redpanda"
    }

    async fn publish(&self, envelope: &NotificationEnvelope) -> Result<()> {
        let payload = serialize_event(envelope)?;
        let key = envelope.event_data.caller.to_string();

        let result = self
            .circuit_breaker
            .call(async {
                let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

                self.producer
                    .send(record, SEND_TIMEOUT)
                    .await
                    .map_err(|(e, _)| anyhow::anyhow!("Kafka send error: {}", e))?;

                Ok::<(), anyhow::Error>(())
            })
            .await;

        self.metrics
            .record_circuit_state(self.circuit_breaker.state().await.as_gauge());

        match result {
            Ok(()) => {
                tracing::debug!(
                    topic = %self.topic,
                    key = %key,
                    event_id = %envelope.event_id,
                    "Published notification to Redpanda"
                );
                Ok(())
            }
            Err(CircuitBreakerError::CircuitOpen) => {
                anyhow::bail!("Circuit breaker open for topic {}", self.topic)
            }
            Err(CircuitBreakerError::OperationFailed(e)) => Err(e),
        }
    }
}
