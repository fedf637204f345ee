// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// The participant registry aggregate, its value objects, commands, events,
// errors and command handler. Independent of the transport that carries
// notifications and of whatever hosts the service.
//
// ============================================================================

pub mod participant;
