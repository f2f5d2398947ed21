//! Repository for the `saves` and `saved_characters` tables.

use std::collections::HashMap;

use grail_core::snapshot::{ArchetypeRestore, CharacterSnapshot};
use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::save::{Save, SaveWithCharacters, SavedCharacter};
use crate::repositories::CharacterRepo;

/// Column list for the `saves` table.
const COLUMNS: &str = "id, campaign_id, name, created_at, updated_at";

/// Column list for the `saved_characters` table.
const CHARACTER_COLUMNS: &str = "id, save_id, character_type, player_name, \
    food, wealth, experience, magic, energy, health, terror, location_number, \
    created_at, updated_at";

/// Provides snapshot capture, listing, deletion and restore.
pub struct SaveRepo;

impl SaveRepo {
    /// Insert a save and every captured character in one transaction.
    pub async fn create_with_characters(
        pool: &PgPool,
        campaign_id: DbId,
        name: &str,
        characters: &[CharacterSnapshot],
    ) -> Result<SaveWithCharacters, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO saves (campaign_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let save = sqlx::query_as::<_, Save>(&query)
            .bind(campaign_id)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO saved_characters \
                (save_id, character_type, player_name, food, wealth, experience, \
                 magic, energy, health, terror, location_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {CHARACTER_COLUMNS}"
        );
        let mut saved = Vec::with_capacity(characters.len());
        for snapshot in characters {
            let c = snapshot.counters;
            let row = sqlx::query_as::<_, SavedCharacter>(&insert)
                .bind(save.id)
                .bind(&snapshot.character_type)
                .bind(&snapshot.player_name)
                .bind(c.food)
                .bind(c.wealth)
                .bind(c.experience)
                .bind(c.magic)
                .bind(c.energy)
                .bind(c.health)
                .bind(c.terror)
                .bind(snapshot.location_number)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(SaveWithCharacters {
            save,
            characters: saved,
        })
    }

    /// Find a save with its characters, scoped to the owning campaign.
    pub async fn find_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<SaveWithCharacters>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM saves WHERE id = $1 AND campaign_id = $2");
        let save = sqlx::query_as::<_, Save>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await?;

        let Some(save) = save else {
            return Ok(None);
        };
        let mut characters = Self::characters_for(pool, &[save.id]).await?;
        let characters = characters.remove(&save.id).unwrap_or_default();
        Ok(Some(SaveWithCharacters { save, characters }))
    }

    /// List a campaign's saves, newest first, each with its characters.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<SaveWithCharacters>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saves \
             WHERE campaign_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let saves = sqlx::query_as::<_, Save>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = saves.iter().map(|s| s.id).collect();
        let mut characters = Self::characters_for(pool, &ids).await?;

        Ok(saves
            .into_iter()
            .map(|save| {
                let characters = characters.remove(&save.id).unwrap_or_default();
                SaveWithCharacters { save, characters }
            })
            .collect())
    }

    /// Delete a save and its captured characters, scoped to the owning
    /// campaign. Returns `true` if a row was removed.
    pub async fn delete_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saves WHERE id = $1 AND campaign_id = $2")
            .bind(id)
            .bind(campaign_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replay a save's counters onto the campaign's live characters.
    ///
    /// Each saved character overwrites every live character of the same
    /// archetype. Archetypes with no live counterpart match zero rows and
    /// are reported rather than treated as errors. All updates commit
    /// together.
    pub async fn restore(
        pool: &PgPool,
        campaign_id: DbId,
        save: &SaveWithCharacters,
    ) -> Result<Vec<ArchetypeRestore>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut restored = Vec::with_capacity(save.characters.len());
        for saved in &save.characters {
            let matched = CharacterRepo::overwrite_counters_by_type(
                &mut tx,
                campaign_id,
                &saved.character_type,
                &saved.counters(),
            )
            .await?;
            tracing::debug!(
                save_id = save.save.id,
                character_type = %saved.character_type,
                matched,
                "Restored archetype counters",
            );
            restored.push(ArchetypeRestore {
                character_type: saved.character_type.clone(),
                matched,
            });
        }

        tx.commit().await?;
        Ok(restored)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Load saved characters for several saves, grouped by save, in
    /// insertion order.
    async fn characters_for(
        pool: &PgPool,
        save_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<SavedCharacter>>, sqlx::Error> {
        if save_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {CHARACTER_COLUMNS} FROM saved_characters \
             WHERE save_id = ANY($1) \
             ORDER BY save_id, id ASC"
        );
        let rows = sqlx::query_as::<_, SavedCharacter>(&query)
            .bind(save_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<SavedCharacter>> = HashMap::new();
        for row in rows {
            grouped.entry(row.save_id).or_default().push(row);
        }
        Ok(grouped)
    }
}
