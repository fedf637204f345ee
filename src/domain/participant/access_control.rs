use serde::{Deserialize, Serialize};

use super::errors::RegistryError;
use super::value_objects::ParticipantId;

/// Gatekeeper for organizer-only operations.
///
/// The organizer is fixed when the registry is created and has no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    organizer: ParticipantId,
}

impl AccessControl {
    pub fn new(organizer: ParticipantId) -> Self {
        Self { organizer }
    }

    pub fn organizer(&self) -> ParticipantId {
        self.organizer
    }

    pub fn require_organizer(&self, caller: ParticipantId) -> Result<(), RegistryError> {
        if caller != self.organizer {
            return Err(RegistryError::Unauthorized { caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organizer_passes() {
        let organizer = ParticipantId::new();
        let access = AccessControl::new(organizer);

        assert!(access.require_organizer(organizer).is_ok());
        assert_eq!(access.organizer(), organizer);
    }

    #[test]
    fn test_other_caller_is_rejected() {
        let access = AccessControl::new(ParticipantId::new());
        let intruder = ParticipantId::new();

        let result = access.require_organizer(intruder);
        assert!(matches!(
            result,
            Err(RegistryError::Unauthorized { caller }) if caller == intruder
        ));
    }
}
