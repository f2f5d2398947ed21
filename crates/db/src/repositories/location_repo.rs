//! Repository for the `locations` table and the entries nested under it.

use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::entry::EntryWrite;
use crate::models::location::{Location, LocationWithEntries, LocationWrite};
use crate::repositories::EntryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, number, name, dream, nightmare, \
    has_menhir, menhir_note, notes, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a location and its nested entries in one transaction.
    ///
    /// A failure on any entry rolls back the location too.
    pub async fn create_with_entries(
        pool: &PgPool,
        campaign_id: DbId,
        input: &LocationWrite,
        entries: &[EntryWrite],
    ) -> Result<LocationWithEntries, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO locations \
                (campaign_id, number, name, dream, nightmare, has_menhir, menhir_note, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let location = sqlx::query_as::<_, Location>(&query)
            .bind(campaign_id)
            .bind(input.number)
            .bind(&input.name)
            .bind(&input.dream)
            .bind(&input.nightmare)
            .bind(input.has_menhir)
            .bind(&input.menhir_note)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let entries = EntryRepo::insert_batch(&mut tx, location.id, entries).await?;

        tx.commit().await?;
        Ok(LocationWithEntries { location, entries })
    }

    /// Find a location, scoped to the campaign that owns it.
    pub async fn find_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1 AND campaign_id = $2");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a location with its entries, scoped to the owning campaign.
    pub async fn find_with_entries(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<Option<LocationWithEntries>, sqlx::Error> {
        let Some(location) = Self::find_in_campaign(pool, campaign_id, id).await? else {
            return Ok(None);
        };
        let entries = EntryRepo::list_by_location(pool, location.id).await?;
        Ok(Some(LocationWithEntries { location, entries }))
    }

    /// ID of the location holding `number` in this campaign, if any.
    pub async fn find_id_by_number(
        pool: &PgPool,
        campaign_id: DbId,
        number: i32,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM locations WHERE campaign_id = $1 AND number = $2",
        )
        .bind(campaign_id)
        .bind(number)
        .fetch_optional(pool)
        .await
    }

    /// List a campaign's locations by number ascending, each with its entries.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<LocationWithEntries>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE campaign_id = $1 ORDER BY number ASC"
        );
        let locations = sqlx::query_as::<_, Location>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = locations.iter().map(|l| l.id).collect();
        let mut entries = EntryRepo::list_by_locations(pool, &ids).await?;

        Ok(locations
            .into_iter()
            .map(|location| {
                let entries = entries.remove(&location.id).unwrap_or_default();
                LocationWithEntries { location, entries }
            })
            .collect())
    }

    /// Overwrite a location and, when `entries` is given, replace its
    /// entries. Both happen in one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &LocationWrite,
        entries: Option<&[EntryWrite]>,
    ) -> Result<Option<LocationWithEntries>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE locations SET \
                number = $2, name = $3, dream = $4, nightmare = $5, \
                has_menhir = $6, menhir_note = $7, notes = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let location = sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(input.number)
            .bind(&input.name)
            .bind(&input.dream)
            .bind(&input.nightmare)
            .bind(input.has_menhir)
            .bind(&input.menhir_note)
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(location) = location else {
            return Ok(None);
        };

        if let Some(entries) = entries {
            EntryRepo::replace_all(&mut tx, location.id, entries).await?;
        }

        tx.commit().await?;

        let entries = EntryRepo::list_by_location(pool, location.id).await?;
        Ok(Some(LocationWithEntries { location, entries }))
    }

    /// Delete a location (and its entries), scoped to the owning campaign.
    /// Returns `true` if a row was removed.
    pub async fn delete_in_campaign(
        pool: &PgPool,
        campaign_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND campaign_id = $2")
            .bind(id)
            .bind(campaign_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
