use super::value_objects::ParticipantId;

// ============================================================================
// Registry Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Caller {caller} is not the organizer")]
    Unauthorized { caller: ParticipantId },

    /// A participant age outside `[minimum, maximum)`, or a proposed floor
    /// below the absolute minimum (no upper bound, so `maximum` is `None`).
    #[error(
        "Invalid age {age}: must be at least {minimum}{}",
        .maximum.map(|maximum| format!(" and below {maximum}")).unwrap_or_default()
    )]
    InvalidAge { age: u8, minimum: u8, maximum: Option<u8> },

    #[error("Registry is full ({capacity} participants)")]
    CapacityExceeded { capacity: usize },

    #[error("Participant not found: {0}")]
    NotFound(ParticipantId),

    #[error("Registry not initialized")]
    NotInitialized,
}

impl RegistryError {
    /// Stable label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            RegistryError::Unauthorized { .. } => "unauthorized",
            RegistryError::InvalidAge { .. } => "invalid_age",
            RegistryError::CapacityExceeded { .. } => "capacity_exceeded",
            RegistryError::NotFound(_) => "not_found",
            RegistryError::NotInitialized => "not_initialized",
        }
    }
}
