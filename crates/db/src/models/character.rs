//! Character entity model and DTOs.

use grail_core::error::CoreError;
use grail_core::patch::coalesce;
use grail_core::roster::{Archetype, Counters};
use grail_core::text::require_text;
use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub campaign_id: DbId,
    pub character_type: String,
    pub player_name: String,
    pub food: i32,
    pub wealth: i32,
    pub experience: i32,
    pub magic: i32,
    pub energy: i32,
    pub health: i32,
    pub terror: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
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

/// DTO for adding a character to a campaign.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    #[serde(default)]
    pub character_type: String,
    #[serde(default)]
    pub player_name: String,
}

/// DTO for partially updating a character. Every field coalesces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacter {
    pub player_name: Option<String>,
    pub food: Option<i32>,
    pub wealth: Option<i32>,
    pub experience: Option<i32>,
    pub magic: Option<i32>,
    pub energy: Option<i32>,
    pub health: Option<i32>,
    pub terror: Option<i32>,
}

/// Validated values for a new character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub archetype: Archetype,
    pub player_name: String,
    pub counters: Counters,
}

/// Fully resolved column values for an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterWrite {
    pub player_name: String,
    pub counters: Counters,
}

impl CreateCharacter {
    /// Validate the archetype and name, and attach the starting counters.
    pub fn resolve(&self) -> Result<NewCharacter, CoreError> {
        let archetype = Archetype::parse(&self.character_type)?;
        let player_name = require_text("Player name", &self.player_name)?;
        Ok(NewCharacter {
            archetype,
            player_name,
            counters: Counters::starting(archetype),
        })
    }
}

impl UpdateCharacter {
    /// Merge this patch over `existing`.
    pub fn resolve(&self, existing: &Character) -> Result<CharacterWrite, CoreError> {
        let player_name = match &self.player_name {
            Some(name) => require_text("Player name", name)?,
            None => existing.player_name.clone(),
        };
        let current = existing.counters();
        Ok(CharacterWrite {
            player_name,
            counters: Counters {
                food: coalesce(self.food, current.food),
                wealth: coalesce(self.wealth, current.wealth),
                experience: coalesce(self.experience, current.experience),
                magic: coalesce(self.magic, current.magic),
                energy: coalesce(self.energy, current.energy),
                health: coalesce(self.health, current.health),
                terror: coalesce(self.terror, current.terror),
            },
        })
    }
}
