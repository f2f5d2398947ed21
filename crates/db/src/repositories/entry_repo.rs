//! Repository for the `entries` table.

use std::collections::HashMap;

use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::entry::{Entry, EntryWrite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, location_id, number, info, status, created_at, updated_at";

/// Provides CRUD operations for location entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a single entry under `location_id`.
    pub async fn create(
        pool: &PgPool,
        location_id: DbId,
        input: &EntryWrite,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (location_id, number, info, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(location_id)
            .bind(input.number)
            .bind(&input.info)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find an entry, scoped to the location that owns it.
    pub async fn find_in_location(
        pool: &PgPool,
        location_id: DbId,
        id: DbId,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1 AND location_id = $2");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(location_id)
            .fetch_optional(pool)
            .await
    }

    /// ID of the entry holding `number` in this location, if any.
    pub async fn find_id_by_number(
        pool: &PgPool,
        location_id: DbId,
        number: i32,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM entries WHERE location_id = $1 AND number = $2",
        )
        .bind(location_id)
        .bind(number)
        .fetch_optional(pool)
        .await
    }

    /// List a location's entries, number ascending.
    pub async fn list_by_location(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries WHERE location_id = $1 ORDER BY number ASC"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Load the entries of several locations at once, grouped by location.
    /// Each group is sorted by number ascending.
    pub async fn list_by_locations(
        pool: &PgPool,
        location_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Entry>>, sqlx::Error> {
        if location_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM entries \
             WHERE location_id = ANY($1) \
             ORDER BY location_id, number ASC"
        );
        let rows = sqlx::query_as::<_, Entry>(&query)
            .bind(location_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Entry>> = HashMap::new();
        for entry in rows {
            grouped.entry(entry.location_id).or_default().push(entry);
        }
        Ok(grouped)
    }

    /// Overwrite an entry with fully resolved values.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EntryWrite,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET number = $2, info = $3, status = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(input.number)
            .bind(&input.info)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry, scoped to its location. Returns `true` if removed.
    pub async fn delete_in_location(
        pool: &PgPool,
        location_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1 AND location_id = $2")
            .bind(id)
            .bind(location_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Insert a batch of entries within an existing transaction.
    pub(crate) async fn insert_batch(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        location_id: DbId,
        entries: &[EntryWrite],
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (location_id, number, info, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, Entry>(&query)
                .bind(location_id)
                .bind(entry.number)
                .bind(&entry.info)
                .bind(&entry.status)
                .fetch_one(&mut **tx)
                .await?;
            created.push(row);
        }
        created.sort_by_key(|e| e.number);
        Ok(created)
    }

    /// Replace every entry of a location within an existing transaction.
    pub(crate) async fn replace_all(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        location_id: DbId,
        entries: &[EntryWrite],
    ) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query("DELETE FROM entries WHERE location_id = $1")
            .bind(location_id)
            .execute(&mut **tx)
            .await?;
        Self::insert_batch(tx, location_id, entries).await
    }
}
