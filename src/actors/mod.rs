// ============================================================================
// Actors Module
// ============================================================================
//
// Message-passing front for callers that prefer actix addresses over direct
// service calls. Business rules stay in the domain layer's command handler.
//
// ============================================================================

mod registry_actor;

pub use registry_actor::{
    GetParticipant, GetSummary, RegisterOrUpdate, RegistryActor, SetMinimumAge,
};
