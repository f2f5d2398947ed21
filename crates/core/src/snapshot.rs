//! Save/restore rules for character snapshots.
//!
//! A save is a named, immutable value copy of every character's counters.
//! Restoring matches live characters by archetype (not by id) and
//! overwrites their seven counters; player names and locations are never
//! written back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roster::Counters;
use crate::text::require_text;

/// One character as captured in a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSnapshot {
    pub character_type: String,
    pub player_name: String,
    #[serde(flatten)]
    pub counters: Counters,
    /// Location the character stood at when saved, if known.
    #[serde(default)]
    pub location_number: Option<i32>,
}

impl CharacterSnapshot {
    /// Capture a live character. The location is unknown server-side.
    pub fn capture(character_type: &str, player_name: &str, counters: Counters) -> Self {
        CharacterSnapshot {
            character_type: character_type.to_string(),
            player_name: player_name.to_string(),
            counters,
            location_number: None,
        }
    }
}

/// Validate and normalise a save name.
pub fn validate_save_name(name: &str) -> Result<String, CoreError> {
    require_text("Save name", name)
}

/// Outcome of restoring one snapshot row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeRestore {
    pub character_type: String,
    /// Live characters overwritten. Zero when the archetype left the roster.
    pub matched: u64,
}

/// Summary returned to the caller after a restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    pub success: bool,
    pub restored_from: String,
    pub restored: Vec<ArchetypeRestore>,
}

impl RestoreReport {
    pub fn new(restored_from: String, restored: Vec<ArchetypeRestore>) -> Self {
        RestoreReport {
            success: true,
            restored_from,
            restored,
        }
    }

    /// Archetypes in the save with no live counterpart.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.restored
            .iter()
            .filter(|r| r.matched == 0)
            .map(|r| r.character_type.as_str())
    }
}
