use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_sourcing::Aggregate;
use super::access_control::AccessControl;
use super::age_validator::AgeValidator;
use super::aggregator::Aggregator;
use super::commands::RegistryCommand;
use super::errors::RegistryError;
use super::events::*;
use super::record_store::{RecordStore, UpsertOutcome};
use super::value_objects::{ParticipantId, ParticipantProfile, ParticipantRecord, ParticipationType};

// ============================================================================
// Registry Aggregate - Business Logic
// ============================================================================
//
// Commands are checked against the current state first (organizer, age,
// capacity) and only then turned into events and applied. A rejected command
// never touches state.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Registry {
    registry_id: Uuid,
    version: i64,
    access: AccessControl,
    age_policy: AgeValidator,
    records: RecordStore,
}

/// Point-in-time view of the registry's counters and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub in_person: usize,
    pub online: usize,
    pub capacity: usize,
    pub minimum_age: u8,
}

impl Registry {
    /// Create a registry owned by `organizer`, returning it with its creation
    /// event.
    pub fn create(organizer: ParticipantId) -> (Self, RegistryEvent) {
        let created = RegistryCreated {
            registry_id: Uuid::now_v7(),
            organizer,
        };
        let registry = Self::from_created(&created);
        (registry, RegistryEvent::Created(created))
    }

    fn from_created(created: &RegistryCreated) -> Self {
        Self {
            registry_id: created.registry_id,
            version: 1,
            access: AccessControl::new(created.organizer),
            age_policy: AgeValidator::new(),
            records: RecordStore::new(),
        }
    }

    pub fn set_minimum_age(
        &mut self,
        caller: ParticipantId,
        new_floor: u8,
    ) -> Result<Vec<RegistryEvent>, RegistryError> {
        self.execute(&RegistryCommand::SetMinimumAge { caller, new_floor })
    }

    /// Register the caller or replace their whole record. Returns the applied
    /// event together with the notification observers are owed for it.
    pub fn register_or_update(
        &mut self,
        caller: ParticipantId,
        profile: ParticipantProfile,
    ) -> Result<(RegistryEvent, RegistrationNotification), RegistryError> {
        let (event, notification) = self.registration(caller, &profile)?;
        self.apply_event(&event)?;
        Ok((event, notification))
    }

    // Age first, then capacity; existing registrants bypass the capacity check.
    fn registration(
        &self,
        caller: ParticipantId,
        profile: &ParticipantProfile,
    ) -> Result<(RegistryEvent, RegistrationNotification), RegistryError> {
        self.age_policy.validate(profile.age)?;

        let registration = match self.records.check_admission(caller)? {
            UpsertOutcome::Registered => (
                RegistryEvent::ParticipantRegistered(ParticipantRegistered {
                    participant_id: caller,
                    profile: profile.clone(),
                }),
                RegistrationNotification::attempt(caller),
            ),
            UpsertOutcome::Updated => (
                RegistryEvent::ParticipantUpdated(ParticipantUpdated {
                    participant_id: caller,
                    profile: profile.clone(),
                }),
                RegistrationNotification::update(caller),
            ),
        };

        Ok(registration)
    }

    // Queries

    pub fn get(&self, id: ParticipantId) -> Result<ParticipantRecord, RegistryError> {
        self.records.get(id)
    }

    pub fn is_registered(&self, id: ParticipantId) -> bool {
        self.records.is_registered(id)
    }

    pub fn total(&self) -> usize {
        Aggregator::new(&self.records).total()
    }

    pub fn count_by_participation_type(&self, participation_type: ParticipationType) -> usize {
        Aggregator::new(&self.records).count_by_participation_type(participation_type)
    }

    pub fn summary(&self) -> RegistrySummary {
        let aggregator = Aggregator::new(&self.records);
        let counts = aggregator.participation_counts();
        RegistrySummary {
            total: aggregator.total(),
            in_person: counts.in_person,
            online: counts.online,
            capacity: self.records.capacity(),
            minimum_age: self.age_policy.minimum_age(),
        }
    }

    pub fn registered_ids(&self) -> &[ParticipantId] {
        self.records.ids()
    }

    pub fn minimum_age(&self) -> u8 {
        self.age_policy.minimum_age()
    }

    pub fn organizer(&self) -> ParticipantId {
        self.access.organizer()
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }
}

impl Aggregate for Registry {
    type Event = RegistryEvent;
    type Command = RegistryCommand;
    type Error = RegistryError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            RegistryEvent::Created(created) => Ok(Self::from_created(created)),
            _ => Err(RegistryError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            RegistryEvent::Created(_) => {
                // Already applied in apply_first_event
            }
            RegistryEvent::MinimumAgeChanged(e) => {
                self.age_policy.set_floor(e.new_minimum_age)?;
            }
            RegistryEvent::ParticipantRegistered(e) => {
                self.records.upsert(e.participant_id, e.profile.clone())?;
            }
            RegistryEvent::ParticipantUpdated(e) => {
                self.records.upsert(e.participant_id, e.profile.clone())?;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            RegistryCommand::SetMinimumAge { caller, new_floor } => {
                self.access.require_organizer(*caller)?;
                AgeValidator::check_floor(*new_floor)?;

                Ok(vec![RegistryEvent::MinimumAgeChanged(MinimumAgeChanged {
                    old_minimum_age: self.age_policy.minimum_age(),
                    new_minimum_age: *new_floor,
                })])
            }

            RegistryCommand::RegisterOrUpdate { caller, profile } => {
                let (event, _) = self.registration(*caller, profile)?;
                Ok(vec![event])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.registry_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
