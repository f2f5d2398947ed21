//! Save (snapshot) entity models and DTOs.
//!
//! Saves and their saved characters are immutable once written; the only
//! later mutation is deleting the whole save.

use grail_core::roster::Counters;
use grail_core::snapshot::CharacterSnapshot;
use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `saves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Save {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `saved_characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCharacter {
    pub id: DbId,
    pub save_id: DbId,
    pub character_type: String,
    pub player_name: String,
    pub food: i32,
    pub wealth: i32,
    pub experience: i32,
    pub magic: i32,
    pub energy: i32,
    pub health: i32,
    pub terror: i32,
    pub location_number: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SavedCharacter {
    pub fn counters(&self) -> Counters {
        Counters {
            food: self.food,
            wealth: self.wealth,
            experience: self.experience,
            magic: self.magic,
            energy: self.energy,
            health: self.health,
            terror: self.terror,
        }
    }
}

/// A save together with its captured characters.
#[derive(Debug, Clone, Serialize)]
pub struct SaveWithCharacters {
    #[serde(flatten)]
    pub save: Save,
    pub characters: Vec<SavedCharacter>,
}

/// DTO for creating a save.
///
/// When `characters` is omitted the campaign's live roster is captured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSave {
    #[serde(default)]
    pub name: String,
    pub characters: Option<Vec<CharacterSnapshot>>,
}
