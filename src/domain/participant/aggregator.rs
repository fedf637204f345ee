use serde::{Deserialize, Serialize};

use super::record_store::RecordStore;
use super::value_objects::ParticipationType;

// ============================================================================
// Aggregator - derived counts over the record store
// ============================================================================
//
// Counts are recomputed from the store on every call. Nothing is cached, so
// they cannot drift from the records.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipationCounts {
    pub in_person: usize,
    pub online: usize,
}

pub struct Aggregator<'a> {
    store: &'a RecordStore,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn total(&self) -> usize {
        self.store.registered_count()
    }

    pub fn count_by_participation_type(&self, participation_type: ParticipationType) -> usize {
        self.store
            .iter()
            .filter(|(_, record)| record.profile.participation_type == participation_type)
            .count()
    }

    /// Both per-type counts in a single scan.
    pub fn participation_counts(&self) -> ParticipationCounts {
        self.store
            .iter()
            .fold(ParticipationCounts::default(), |mut counts, (_, record)| {
                match record.profile.participation_type {
                    ParticipationType::InPerson => counts.in_person += 1,
                    ParticipationType::Online => counts.online += 1,
                }
                counts
            })
    }
}
