use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Participant Value Objects
// ============================================================================

/// Opaque, comparable identity of a caller or participant.
///
/// The registry never interprets the value; it only compares and hashes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact email, stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(pub String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skillset {
    Developer,
    Designer,
    Writer,
    Presenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipationType {
    InPerson,
    Online,
}

impl ParticipationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationType::InPerson => "in_person",
            ParticipationType::Online => "online",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    NutFree,
    DairyFree,
    Other,
}

/// Everything a participant submits when registering or updating.
///
/// A submission always carries every field: an update replaces the stored
/// profile wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub name: String,
    pub age: u8,
    pub email: Email,
    pub skillset: Skillset,
    pub participation_type: ParticipationType,
    pub needs_lodging: bool,
    pub dietary_restriction: DietaryRestriction,
}

/// Stored per-participant state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub profile: ParticipantProfile,
    pub registered: bool,
}

impl ParticipantRecord {
    pub fn registered(profile: ParticipantProfile) -> Self {
        Self {
            profile,
            registered: true,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
