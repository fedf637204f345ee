use uuid::Uuid;
use anyhow::Result;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// 1. Commands are validated against current state without mutating it
// 2. Validation yields events describing what happened
// 3. Events are the only thing that changes state
//
// A command that fails validation therefore leaves the aggregate untouched.
//
// ============================================================================

/// Generic aggregate trait
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized + Send + Sync {
    type Event;
    type Command;
    type Error;

    /// Create new aggregate from first event
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Validate a command and describe its effect as events
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    fn aggregate_id(&self) -> Uuid;

    /// Number of events applied so far, creation included
    fn version(&self) -> i64;

    /// Validate then apply in one step, returning the applied events
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle_command(command)?;
        for event in &events {
            self.apply_event(event)?;
        }
        Ok(events)
    }

    /// Rebuild an aggregate from its ordered event history
    fn load_from_events(events: Vec<EventEnvelope<Self::Event>>) -> Result<Self>
    where
        Self::Error: std::fmt::Display,
    {
        let Some((first, rest)) = events.split_first() else {
            anyhow::bail!("No events to load");
        };

        let mut aggregate = Self::apply_first_event(&first.event_data)
            .map_err(|e| anyhow::anyhow!("Failed to apply first event: {}", e))?;

        for envelope in rest {
            aggregate.apply_event(&envelope.event_data)
                .map_err(|e| anyhow::anyhow!("Failed to apply event {}: {}", envelope.sequence_number, e))?;
        }

        Ok(aggregate)
    }
}
