use actix::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use participant_registry::actors::{GetSummary, RegisterOrUpdate, RegistryActor, SetMinimumAge};
use participant_registry::config::AppConfig;
use participant_registry::domain::participant::{
    DietaryRestriction, Email, ParticipantId, ParticipantProfile, ParticipationType,
    RegistryService, Skillset,
};
use participant_registry::messaging::{LoggingPublisher, NotificationPublisher, RedpandaPublisher};
use participant_registry::metrics::{self, Metrics};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, overridable with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,participant_registry=debug")),
        )
        .init();

    tracing::info!("🚀 Starting participant registry");

    let config = AppConfig::from_env()?;
    let organizer = config.organizer_id.unwrap_or_default();

    let metrics = Arc::new(Metrics::new()?);

    // === 1. Notification publisher ===
    let publisher: Arc<dyn NotificationPublisher> = match &config.redpanda_brokers {
        Some(brokers) => {
            tracing::info!(brokers = %brokers, topic = %config.notification_topic, "Publishing notifications to Redpanda");
            Arc::new(RedpandaPublisher::new(
                brokers,
                config.notification_topic.clone(),
                metrics.clone(),
            )?)
        }
        None => {
            tracing::info!("No REDPANDA_BROKERS set, notifications will only be logged");
            Arc::new(LoggingPublisher)
        }
    };

    // === 2. Registry service ===
    let service = Arc::new(RegistryService::new(organizer, publisher, metrics.clone()));

    let server = metrics::start_metrics_server(
        Arc::new(metrics.registry().clone()),
        service.clone(),
        config.metrics_port,
    )?;
    actix::spawn(async move {
        if let Err(e) = server.await {
            tracing::error!("Metrics server error: {}", e);
        }
    });

    // === 3. Registry actor ===
    let registry = RegistryActor::new(service.clone()).start();

    // === 4. Walk through a registration lifecycle ===
    let alice = ParticipantId::new();
    let bob = ParticipantId::new();

    let mut profile = ParticipantProfile {
        name: "Alice".to_string(),
        age: 20,
        email: Email::new("alice@example.com"),
        skillset: Skillset::Developer,
        participation_type: ParticipationType::InPerson,
        needs_lodging: true,
        dietary_restriction: DietaryRestriction::None,
    };

    let notification = registry
        .send(RegisterOrUpdate { caller: alice, profile: profile.clone() })
        .await??;
    tracing::info!(kind = notification.kind.as_str(), "✅ Alice registered");

    profile.participation_type = ParticipationType::Online;
    let notification = registry
        .send(RegisterOrUpdate { caller: alice, profile })
        .await??;
    tracing::info!(kind = notification.kind.as_str(), "✅ Alice switched to online");

    let too_young = ParticipantProfile {
        name: "Bob".to_string(),
        age: 16,
        email: Email::new("bob@example.com"),
        skillset: Skillset::Designer,
        participation_type: ParticipationType::InPerson,
        needs_lodging: false,
        dietary_restriction: DietaryRestriction::Vegetarian,
    };
    match registry.send(RegisterOrUpdate { caller: bob, profile: too_young.clone() }).await? {
        Ok(_) => tracing::warn!("Bob was admitted under the default floor"),
        Err(e) => tracing::info!(error = %e, "❌ Bob rejected"),
    }

    registry.send(SetMinimumAge { caller: organizer, new_floor: 16 }).await??;
    registry.send(RegisterOrUpdate { caller: bob, profile: too_young }).await??;
    tracing::info!("✅ Bob registered after the floor was lowered to 16");

    let summary = registry.send(GetSummary).await?;
    tracing::info!(
        total = summary.total,
        in_person = summary.in_person,
        online = summary.online,
        minimum_age = summary.minimum_age,
        "📊 Registry summary"
    );

    tracing::info!("⏳ Serving /metrics and /health on port {}, Ctrl-C to stop", config.metrics_port);
    tokio::signal::ctrl_c().await?;

    tracing::info!("🎉 Shutting down");
    Ok(())
}
