use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use uuid::Uuid;

use crate::domain::participant::ParticipantId;

pub const DEFAULT_METRICS_PORT: u16 = 9090;
pub const DEFAULT_NOTIFICATION_TOPIC: &str = "registration-notifications";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Organizer identity; a fresh one is generated when unset
    pub organizer_id: Option<ParticipantId>,
    pub metrics_port: u16,
    /// Broker list for notifications; notifications are only logged when unset
    pub redpanda_brokers: Option<String>,
    pub notification_topic: String,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let organizer_id = lookup("REGISTRY_ORGANIZER_ID")
            .map(|raw| {
                Uuid::parse_str(raw.trim())
                    .map(ParticipantId::from)
                    .context("REGISTRY_ORGANIZER_ID must be a valid UUID")
            })
            .transpose()?;

        let metrics_port: u16 = match lookup("METRICS_PORT") {
            Some(raw) => raw.trim().parse().context("METRICS_PORT must be a valid port number")?,
            None => DEFAULT_METRICS_PORT,
        };

        Ok(Self {
            organizer_id,
            metrics_port,
            redpanda_brokers: lookup("REDPANDA_BROKERS").filter(|brokers| !brokers.trim().is_empty()),
            notification_topic: lookup("NOTIFICATION_TOPIC")
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TOPIC.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert!(config.organizer_id.is_none());
        assert_eq!(config.metrics_port, 9090);
        assert!(config.redpanda_brokers.is_none());
        assert_eq!(config.notification_topic, "registration-notifications");
    }

    #[test]
    fn test_explicit_values() {
        let organizer = Uuid::new_v4();
        let organizer_raw = organizer.to_string();
        let config = config_from(&[
            ("REGISTRY_ORGANIZER_ID", organizer_raw.as_str()),
            ("METRICS_PORT", "9100"),
            ("REDPANDA_BROKERS", "127.0.0.1:9092"),
            ("NOTIFICATION_TOPIC", "signups"),
        ])
        .unwrap();

        assert_eq!(config.organizer_id, Some(ParticipantId::from(organizer)));
        assert_eq!(config.metrics_port, 9100);
        assert_eq!(config.redpanda_brokers.as_deref(), Some("127.0.0.1:9092"));
        assert_eq!(config.notification_topic, "signups");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("METRICS_PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("REGISTRY_ORGANIZER_ID", "organizer")]).is_err());
    }

    #[test]
    fn test_blank_brokers_fall_back_to_logging() {
        let config = config_from(&[("REDPANDA_BROKERS", "  ")]).unwrap();
        assert!(config.redpanda_brokers.is_none());
    }
}
