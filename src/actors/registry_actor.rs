use actix::prelude::*;
use std::sync::Arc;

use crate::domain::participant::{
    ParticipantId, ParticipantProfile, ParticipantRecord, RegistrationNotification,
    RegistryError, RegistryService, RegistrySummary,
};

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Result<RegistrationNotification, RegistryError>")]
pub struct RegisterOrUpdate {
    pub caller: ParticipantId,
    pub profile: ParticipantProfile,
}

#[derive(Message)]
#[rtype(result = "Result<(), RegistryError>")]
pub struct SetMinimumAge {
    pub caller: ParticipantId,
    pub new_floor: u8,
}

#[derive(Message)]
#[rtype(result = "Result<ParticipantRecord, RegistryError>")]
pub struct GetParticipant {
    pub participant_id: ParticipantId,
}

#[derive(Message)]
#[rtype(result = "RegistrySummary")]
pub struct GetSummary;

// ============================================================================
// Registry Actor - message-passing front for the registry service
// ============================================================================
//
// Holds no state of its own. Ordering and atomicity come from the service's
// lock, so several actors may front the same service.
//
// ============================================================================

pub struct RegistryActor {
    service: Arc<RegistryService>,
}

impl RegistryActor {
    pub fn new(service: Arc<RegistryService>) -> Self {
        Self { service }
    }
}

impl Actor for RegistryActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("RegistryActor started");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<RegisterOrUpdate> for RegistryActor {
    type Result = ResponseFuture<Result<RegistrationNotification, RegistryError>>;

    fn handle(&mut self, msg: RegisterOrUpdate, _: &mut Self::Context) -> Self::Result {
        let service = self.service.clone();
        Box::pin(async move { service.register_or_update(msg.caller, msg.profile).await })
    }
}

impl Handler<SetMinimumAge> for RegistryActor {
    type Result = ResponseFuture<Result<(), RegistryError>>;

    fn handle(&mut self, msg: SetMinimumAge, _: &mut Self::Context) -> Self::Result {
        let service = self.service.clone();
        Box::pin(async move { service.set_minimum_age(msg.caller, msg.new_floor).await })
    }
}

impl Handler<GetParticipant> for RegistryActor {
    type Result = ResponseFuture<Result<ParticipantRecord, RegistryError>>;

    fn handle(&mut self, msg: GetParticipant, _: &mut Self::Context) -> Self::Result {
        let service = self.service.clone();
        Box::pin(async move { service.get(msg.participant_id).await })
    }
}

impl Handler<GetSummary> for RegistryActor {
    type Result = ResponseFuture<RegistrySummary>;

    fn handle(&mut self, _: GetSummary, _: &mut Self::Context) -> Self::Result {
        let service = self.service.clone();
        Box::pin(async move { service.summary().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::{
        DietaryRestriction, Email, NotificationKind, ParticipationType, Skillset,
    };
    use crate::messaging::LoggingPublisher;
    use crate::metrics::Metrics;

    fn profile(age: u8) -> ParticipantProfile {
        ParticipantProfile {
            name: "Margaret".to_string(),
            age,
            email: Email::new("margaret@example.com"),
            skillset: Skillset::Writer,
            participation_type: ParticipationType::Online,
            needs_lodging: false,
            dietary_restriction: DietaryRestriction::Vegan,
        }
    }

    fn start(organizer: ParticipantId) -> Addr<RegistryActor> {
        let service = Arc::new(RegistryService::new(
            organizer,
            Arc::new(LoggingPublisher),
            Arc::new(Metrics::new().unwrap()),
        ));
        RegistryActor::new(service).start()
    }

    #[actix::test]
    async fn test_register_and_read_through_actor() {
        let addr = start(ParticipantId::new());
        let participant = ParticipantId::new();

        let notification = addr
            .send(RegisterOrUpdate { caller: participant, profile: profile(35) })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(notification.kind, NotificationKind::RegistrationAttempt);

        let record = addr
            .send(GetParticipant { participant_id: participant })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.profile, profile(35));

        let summary = addr.send(GetSummary).await.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.online, 1);
    }

    #[actix::test]
    async fn test_errors_travel_back_to_sender() {
        let organizer = ParticipantId::new();
        let addr = start(organizer);

        let result = addr
            .send(SetMinimumAge { caller: ParticipantId::new(), new_floor: 30 })
            .await
            .unwrap();
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));

        let result = addr
            .send(SetMinimumAge { caller: organizer, new_floor: 12 })
            .await
            .unwrap();
        assert!(matches!(result, Err(RegistryError::InvalidAge { age: 12, maximum: None, .. })));

        let result = addr
            .send(GetParticipant { participant_id: ParticipantId::new() })
            .await
            .unwrap();
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }
}
