//! Persona detection
//!
//! Keyword matching is case-insensitive and substring based. Resident cues win
//! over tourist cues in the same message, and a message without cues keeps the
//! current persona, so a detected persona never falls back to `Unknown`.

use serde::{Deserialize, Serialize};

/// Cues that the user is settling in the city
pub const NEW_RESIDENT_KEYWORDS: &[&str] =
    &["moving here", "work", "live", "neighborhood", "study", "job"];

/// Cues that the user is visiting
pub const TOURIST_KEYWORDS: &[&str] = &[
    "weekend trip",
    "visiting",
    "see",
    "attractions",
    "tour",
    "explore",
    "visit",
    "holiday",
];

/// Who the concierge believes it is talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaState {
    /// Not yet detected
    #[default]
    Unknown,
    /// Short-term visitor
    Tourist,
    /// Someone moving to the city
    NewResident,
}

impl PersonaState {
    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Tourist => "Tourist",
            Self::NewResident => "New Resident",
        }
    }

    /// Whether a concrete persona has been detected
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for PersonaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify `input`, keeping `current` when no cue matches
#[must_use]
pub fn classify(input: &str, current: PersonaState) -> PersonaState {
    let lower = input.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if matches(NEW_RESIDENT_KEYWORDS) {
        PersonaState::NewResident
    } else if matches(TOURIST_KEYWORDS) {
        PersonaState::Tourist
    } else {
        current
    }
}
