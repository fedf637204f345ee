use serde::{Deserialize, Serialize};

use super::errors::RegistryError;

/// Lowest eligibility floor the organizer may ever configure.
pub const ABSOLUTE_MINIMUM_AGE: u8 = 13;

/// Floor in effect when a registry is created.
pub const DEFAULT_MINIMUM_AGE: u8 = 18;

/// Ages must stay strictly below this bound.
pub const MAXIMUM_AGE_EXCLUSIVE: u8 = 100;

// ============================================================================
// Age Validator - admission eligibility rule
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeValidator {
    minimum_age: u8,
}

impl AgeValidator {
    pub fn new() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
        }
    }

    pub fn minimum_age(&self) -> u8 {
        self.minimum_age
    }

    /// Check a proposed floor without applying it.
    pub fn check_floor(new_floor: u8) -> Result<(), RegistryError> {
        if new_floor < ABSOLUTE_MINIMUM_AGE {
            return Err(RegistryError::InvalidAge {
                age: new_floor,
                minimum: ABSOLUTE_MINIMUM_AGE,
                maximum: None,
            });
        }
        Ok(())
    }

    pub fn set_floor(&mut self, new_floor: u8) -> Result<(), RegistryError> {
        Self::check_floor(new_floor)?;
        self.minimum_age = new_floor;
        Ok(())
    }

    pub fn validate(&self, age: u8) -> Result<(), RegistryError> {
        if age < self.minimum_age || age >= MAXIMUM_AGE_EXCLUSIVE {
            return Err(RegistryError::InvalidAge {
                age,
                minimum: self.minimum_age,
                maximum: Some(MAXIMUM_AGE_EXCLUSIVE),
            });
        }
        Ok(())
    }
}

impl Default for AgeValidator {
    fn default() -> Self {
        Self::new()
    }
}
