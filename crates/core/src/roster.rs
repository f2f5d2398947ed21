//! Character roster rules: the fixed archetype catalog, starting stats, and
//! per-campaign membership limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A campaign holds at most this many characters.
pub const MAX_CHARACTERS_PER_CAMPAIGN: usize = 4;

/// The four playable archetypes. Names are stored verbatim in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Iunis,
    Gerdwyn,
    Elgan,
    Osbert,
}

/// Every archetype, in catalog order.
pub const ALL_ARCHETYPES: [Archetype; 4] = [
    Archetype::Iunis,
    Archetype::Gerdwyn,
    Archetype::Elgan,
    Archetype::Osbert,
];

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Iunis => "Iunis",
            Archetype::Gerdwyn => "Gerdwyn",
            Archetype::Elgan => "Elgan",
            Archetype::Osbert => "Osbert",
        }
    }

    /// Canonical `(energy, health)` a fresh character starts with.
    pub fn starting_energy_health(self) -> (i32, i32) {
        match self {
            Archetype::Iunis => (6, 9),
            Archetype::Gerdwyn => (6, 8),
            Archetype::Elgan => (6, 7),
            Archetype::Osbert => (7, 5),
        }
    }

    /// Parse a user-supplied archetype name (exact, case-sensitive).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        raw.parse()
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ARCHETYPES
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ALL_ARCHETYPES.iter().map(|a| a.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid character type '{s}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// The seven integer counters tracked per character.
///
/// The same vector is copied into save snapshots and written back on
/// restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub food: i32,
    pub wealth: i32,
    pub experience: i32,
    pub magic: i32,
    pub energy: i32,
    pub health: i32,
    pub terror: i32,
}

impl Counters {
    /// Counters for a freshly created character of `archetype`.
    pub fn starting(archetype: Archetype) -> Self {
        let (energy, health) = archetype.starting_energy_health();
        Counters {
            energy,
            health,
            ..Counters::default()
        }
    }
}

/// Check that a character of `candidate` may join a campaign whose current
/// roster holds `existing` character types.
///
/// The cap is checked before uniqueness, so a full roster reports
/// [`CoreError::CapacityExceeded`] regardless of the archetype requested.
pub fn ensure_can_join<'a, I>(existing: I, candidate: Archetype) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let existing: Vec<&str> = existing.into_iter().collect();
    if existing.len() >= MAX_CHARACTERS_PER_CAMPAIGN {
        return Err(CoreError::CapacityExceeded(format!(
            "A campaign can have at most {MAX_CHARACTERS_PER_CAMPAIGN} characters"
        )));
    }
    if existing.contains(&candidate.as_str()) {
        return Err(CoreError::Conflict(format!(
            "{candidate} is already in this campaign"
        )));
    }
    Ok(())
}
