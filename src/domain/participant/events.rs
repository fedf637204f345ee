use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{ParticipantId, ParticipantProfile};

// ============================================================================
// Registry Domain Events
// ============================================================================

/// Union type for all registry events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RegistryEvent {
    Created(RegistryCreated),
    MinimumAgeChanged(MinimumAgeChanged),
    ParticipantRegistered(ParticipantRegistered),
    ParticipantUpdated(ParticipantUpdated),
}

impl RegistryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::Created(_) => "RegistryCreated",
            RegistryEvent::MinimumAgeChanged(_) => "MinimumAgeChanged",
            RegistryEvent::ParticipantRegistered(_) => "ParticipantRegistered",
            RegistryEvent::ParticipantUpdated(_) => "ParticipantUpdated",
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryCreated {
    pub registry_id: Uuid,
    pub organizer: ParticipantId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumAgeChanged {
    pub old_minimum_age: u8,
    pub new_minimum_age: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRegistered {
    pub participant_id: ParticipantId,
    pub profile: ParticipantProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantUpdated {
    pub participant_id: ParticipantId,
    pub profile: ParticipantProfile,
}

// ============================================================================
// Outbound Notifications
// ============================================================================

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful";
pub const REGISTRATION_UPDATED_MESSAGE: &str = "Registration updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    RegistrationAttempt,
    RegistrationUpdate,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RegistrationAttempt => "RegistrationAttempt",
            NotificationKind::RegistrationUpdate => "RegistrationUpdate",
        }
    }
}

/// What external observers receive after a successful `registerOrUpdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationNotification {
    pub kind: NotificationKind,
    pub caller: ParticipantId,
    pub success: bool,
    pub message: String,
}

impl RegistrationNotification {
    pub fn attempt(caller: ParticipantId) -> Self {
        Self {
            kind: NotificationKind::RegistrationAttempt,
            caller,
            success: true,
            message: REGISTRATION_SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn update(caller: ParticipantId) -> Self {
        Self {
            kind: NotificationKind::RegistrationUpdate,
            caller,
            success: true,
            message: REGISTRATION_UPDATED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_constructors() {
        let id = ParticipantId::new();

        let notification = RegistrationNotification::attempt(id);
        assert_eq!(notification.kind, NotificationKind::RegistrationAttempt);
        assert_eq!(notification.caller, id);
        assert!(notification.success);
        assert_eq!(notification.message, "Registration successful");

        let notification = RegistrationNotification::update(id);
        assert_eq!(notification.kind, NotificationKind::RegistrationUpdate);
        assert!(notification.success);
        assert_eq!(notification.message, "Registration updated");
    }

    #[test]
    fn test_event_tagged_serialization() {
        let event = RegistryEvent::MinimumAgeChanged(MinimumAgeChanged {
            old_minimum_age: 18,
            new_minimum_age: 21,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "MinimumAgeChanged");
        assert_eq!(json["data"]["new_minimum_age"], 21);
    }
}
