use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::RegistryError;
use super::value_objects::{ParticipantId, ParticipantProfile, ParticipantRecord};

/// Maximum number of distinct registered participants.
pub const CAPACITY: usize = 1000;

// ============================================================================
// Record Store - per-participant records + registration order
// ============================================================================
//
// `order` holds every registered id exactly once, in first-registration
// order. An id is in `order` iff its record exists with `registered == true`.
//
// ============================================================================

/// What an upsert did to the caller's registration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertOutcome {
    Registered,
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<ParticipantId, ParticipantRecord>,
    order: Vec<ParticipantId>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Decide what an upsert from `caller` would do, without touching state.
    ///
    /// Existing registrants are always admitted, even at full capacity.
    pub fn check_admission(&self, caller: ParticipantId) -> Result<UpsertOutcome, RegistryError> {
        if self.is_registered(caller) {
            return Ok(UpsertOutcome::Updated);
        }
        if self.order.len() >= CAPACITY {
            return Err(RegistryError::CapacityExceeded { capacity: CAPACITY });
        }
        Ok(UpsertOutcome::Registered)
    }

    /// Replace the caller's whole record, appending it to the registration
    /// order on first sight. The profile's age must already be validated.
    pub fn upsert(
        &mut self,
        caller: ParticipantId,
        profile: ParticipantProfile,
    ) -> Result<UpsertOutcome, RegistryError> {
        let outcome = self.check_admission(caller)?;
        if outcome == UpsertOutcome::Registered {
            self.order.push(caller);
        }
        self.records.insert(caller, ParticipantRecord::registered(profile));
        Ok(outcome)
    }

    pub fn get(&self, id: ParticipantId) -> Result<ParticipantRecord, RegistryError> {
        match self.records.get(&id) {
            Some(record) if record.registered => Ok(record.clone()),
            _ => Err(RegistryError::NotFound(id)),
        }
    }

    pub fn is_registered(&self, id: ParticipantId) -> bool {
        self.records.get(&id).is_some_and(|record| record.registered)
    }

    /// Number of distinct registered participants.
    pub fn registered_count(&self) -> usize {
        self.order.len()
    }

    /// Registered records in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &ParticipantRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (*id, record)))
    }

    pub fn ids(&self) -> &[ParticipantId] {
        &self.order
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::participant::value_objects::*;
    use uuid::Uuid;

    fn profile(name: &str, participation_type: ParticipationType) -> ParticipantProfile {
        ParticipantProfile {
            name: name.to_string(),
            age: 25,
            email: Email::new(format!("{}@example.com", name.to_lowercase())),
            skillset: Skillset::Designer,
            participation_type,
            needs_lodging: false,
            dietary_restriction: DietaryRestriction::None,
        }
    }

    fn assert_consistent(store: &RecordStore) {
        let registered = store.records.values().filter(|r| r.registered).count();
        assert_eq!(store.order.len(), registered);

        let mut seen = std::collections::HashSet::new();
        for id in &store.order {
            assert!(seen.insert(*id), "duplicate id in order");
            assert!(store.records[id].registered);
        }
        assert!(store.order.len() <= CAPACITY);
    }

    #[test]
    fn test_first_upsert_registers() {
        let mut store = RecordStore::new();
        let id = ParticipantId::new();

        let outcome = store.upsert(id, profile("Ada", ParticipationType::InPerson)).unwrap();

        assert_eq!(outcome, UpsertOutcome::Registered);
        assert!(store.is_registered(id));
        assert_eq!(store.registered_count(), 1);
        assert_eq!(store.ids(), &[id]);
        assert_consistent(&store);
    }

    #[test]
    fn test_second_upsert_overwrites_every_field() {
        let mut store = RecordStore::new();
        let id = ParticipantId::new();
        store.upsert(id, profile("Ada", ParticipationType::InPerson)).unwrap();

        let replacement = ParticipantProfile {
            name: "Ada L.".to_string(),
            age: 31,
            email: Email::new("lovelace@example.com"),
            skillset: Skillset::Writer,
            participation_type: ParticipationType::Online,
            needs_lodging: true,
            dietary_restriction: DietaryRestriction::DairyFree,
        };
        let outcome = store.upsert(id, replacement.clone()).unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.get(id).unwrap().profile, replacement);
        assert_eq!(store.registered_count(), 1);
        assert_consistent(&store);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let store = RecordStore::new();
        let id = ParticipantId::new();

        assert!(matches!(store.get(id), Err(RegistryError::NotFound(missing)) if missing == id));
        assert!(!store.is_registered(id));
    }

    #[test]
    fn test_get_returns_detached_copy() {
        let mut store = RecordStore::new();
        let id = ParticipantId::new();
        store.upsert(id, profile("Ada", ParticipationType::Online)).unwrap();

        let mut copy = store.get(id).unwrap();
        copy.profile.name = "Mallory".to_string();

        assert_eq!(store.get(id).unwrap().profile.name, "Ada");
    }

    #[test]
    fn test_order_follows_first_registration() {
        let mut store = RecordStore::new();
        let ids: Vec<_> = (1..=3).map(|n| ParticipantId::from(Uuid::from_u128(n))).collect();

        for id in ids.iter().rev() {
            store.upsert(*id, profile("P", ParticipationType::Online)).unwrap();
        }
        store.upsert(ids[2], profile("Again", ParticipationType::InPerson)).unwrap();

        let expected: Vec<_> = ids.iter().rev().copied().collect();
        assert_eq!(store.ids(), expected.as_slice());
        assert_eq!(store.iter().map(|(id, _)| id).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_capacity_blocks_new_but_not_existing() {
        let mut store = RecordStore::new();
        let first = ParticipantId::from(Uuid::from_u128(0));

        for n in 0..CAPACITY as u128 {
            store
                .upsert(ParticipantId::from(Uuid::from_u128(n)), profile("P", ParticipationType::Online))
                .unwrap();
        }
        assert_eq!(store.registered_count(), CAPACITY);

        let latecomer = ParticipantId::from(Uuid::from_u128(CAPACITY as u128));
        let result = store.upsert(latecomer, profile("Late", ParticipationType::Online));
        assert!(matches!(result, Err(RegistryError::CapacityExceeded { capacity: CAPACITY })));
        assert!(!store.is_registered(latecomer));

        let outcome = store.upsert(first, profile("First", ParticipationType::InPerson)).unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.registered_count(), CAPACITY);
        assert_consistent(&store);
    }
}
