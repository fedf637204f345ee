// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// No registry-specific code lives here; everything is generic over the
// aggregate and event types.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{EventEnvelope, serialize_event};
