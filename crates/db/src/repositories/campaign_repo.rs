//! Repository for the `campaigns` table.

use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CampaignDetail, CampaignSummary};
use crate::repositories::LocationRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign. `name` must already be trimmed and non-blank.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Campaign, sqlx::Error> {
        let query = format!("INSERT INTO campaigns (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a campaign with every location and entry it owns.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<CampaignDetail>, sqlx::Error> {
        let Some(campaign) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let locations = LocationRepo::list_by_campaign(pool, id).await?;
        Ok(Some(CampaignDetail {
            campaign,
            locations,
        }))
    }

    /// Whether a campaign with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM campaigns WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List campaigns with their location counts, most recently updated first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<CampaignSummary>, sqlx::Error> {
        sqlx::query_as::<_, CampaignSummary>(
            "SELECT c.id, c.name, c.created_at, c.updated_at, COUNT(l.id) AS location_count
             FROM campaigns c
             LEFT JOIN locations l ON l.campaign_id = c.id
             GROUP BY c.id
             ORDER BY c.updated_at DESC, c.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename a campaign. Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("UPDATE campaigns SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign and, by cascade, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
