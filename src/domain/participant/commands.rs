use super::value_objects::{ParticipantId, ParticipantProfile};

// ============================================================================
// Registry Domain Commands
// ============================================================================

#[derive(Debug, Clone)]
pub enum RegistryCommand {
    SetMinimumAge {
        caller: ParticipantId,
        new_floor: u8,
    },
    RegisterOrUpdate {
        caller: ParticipantId,
        profile: ParticipantProfile,
    },
}
