//! Repository for the `characters` table.

use grail_core::roster::Counters;
use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CharacterWrite, NewCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, character_type, player_name, \
    food, wealth, experience, magic, energy, health, terror, created_at, updated_at";

/// Provides CRUD operations for campaign characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a validated character into a campaign.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &NewCharacter,
    ) -> Result<Character, sqlx::Error> {
        let c = input.counters;
        let query = format!(
            "INSERT INTO characters \
                (campaign_id, character_type, player_name, \
                 food, wealth, experience, magic, energy, health, terror) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(campaign_id)
            .bind(input.archetype.as_str())
            .bind(&input.player_name)
            .bind(c.food)
            .bind(c.wealth)
            .bind(c.experience)
            .bind(c.magic)
            .bind(c.energy)
            .bind(c.health)
            .bind(c.terror)
            .fetch_one(pool)
            .await
    }

    /// Find a character, scoped to the campaign that owns it.
    pub async fn find_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1 AND campaign_id = $2");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// List a campaign's characters in the order they joined.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters \
             WHERE campaign_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Archetype names currently on a campaign's roster.
    pub async fn list_types_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT character_type FROM characters WHERE campaign_id = $1 ORDER BY id",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Overwrite a character's name and counters.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CharacterWrite,
    ) -> Result<Option<Character>, sqlx::Error> {
        let c = input.counters;
        let query = format!(
            "UPDATE characters SET \
                player_name = $2, food = $3, wealth = $4, experience = $5, \
                magic = $6, energy = $7, health = $8, terror = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.player_name)
            .bind(c.food)
            .bind(c.wealth)
            .bind(c.experience)
            .bind(c.magic)
            .bind(c.energy)
            .bind(c.health)
            .bind(c.terror)
            .fetch_optional(pool)
            .await
    }

    /// Remove a character from its campaign. Returns `true` if removed.
    pub async fn delete_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1 AND campaign_id = $2")
            .bind(id)
            .bind(campaign_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Overwrite the counters of every character of `character_type` in a
    /// campaign. Player names are left alone. Returns the rows touched.
    pub(crate) async fn overwrite_counters_by_type(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        campaign_id: DbId,
        character_type: &str,
        counters: &Counters,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE characters SET \
                food = $3, wealth = $4, experience = $5, magic = $6, \
                energy = $7, health = $8, terror = $9 \
             WHERE campaign_id = $1 AND character_type = $2",
        )
        .bind(campaign_id)
        .bind(character_type)
        .bind(counters.food)
        .bind(counters.wealth)
        .bind(counters.experience)
        .bind(counters.magic)
        .bind(counters.energy)
        .bind(counters.health)
        .bind(counters.terror)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
