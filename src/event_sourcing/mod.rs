// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Aggregate and envelope abstractions shared by the domain layer.
// Domain-specific code is in src/domain/
//
// ============================================================================

pub mod core;

pub use self::core::*;
