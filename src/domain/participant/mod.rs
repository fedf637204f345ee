// ============================================================================
// Participant Registry Domain
// ============================================================================
//
// - Value objects (ParticipantId, ParticipantProfile, closed enums)
// - AccessControl, AgeValidator, RecordStore, Aggregator
// - Commands, Events, Errors
// - Registry aggregate and RegistryService command handler
//
// ============================================================================

pub mod value_objects;
pub mod access_control;
pub mod age_validator;
pub mod record_store;
pub mod aggregator;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use access_control::AccessControl;
pub use age_validator::{AgeValidator, ABSOLUTE_MINIMUM_AGE, DEFAULT_MINIMUM_AGE, MAXIMUM_AGE_EXCLUSIVE};
pub use record_store::{RecordStore, UpsertOutcome, CAPACITY};
pub use aggregator::{Aggregator, ParticipationCounts};
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
