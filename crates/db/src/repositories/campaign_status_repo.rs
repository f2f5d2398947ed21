//! Repository for the `campaign_statuses` table.
//!
//! A campaign/status row is created lazily the first time the campaign
//! records progress on that status, and updated in place afterwards.

use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign_status::{CampaignStatus, CampaignStatusView};

const COLUMNS: &str = "id, campaign_id, status_id, checked_boxes, created_at, updated_at";

/// Provides checklist progress operations for one campaign.
pub struct CampaignStatusRepo;

impl CampaignStatusRepo {
    /// Every catalog status joined with this campaign's progress, ordered
    /// by name. Untouched statuses report `checked_boxes = ""`.
    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignStatusView>, sqlx::Error> {
        sqlx::query_as::<_, CampaignStatusView>(
            "SELECT s.id, s.name, s.checkbox_count, \
                    COALESCE(cs.checked_boxes, '') AS checked_boxes, \
                    cs.id AS campaign_status_id \
             FROM statuses s \
             LEFT JOIN campaign_statuses cs \
                ON cs.status_id = s.id AND cs.campaign_id = $1 \
             ORDER BY s.name ASC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Find the progress row for one campaign/status pair.
    pub async fn find_by_pair(
        pool: &PgPool,
        campaign_id: DbId,
        status_id: DbId,
    ) -> Result<Option<CampaignStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_statuses \
             WHERE campaign_id = $1 AND status_id = $2"
        );
        sqlx::query_as::<_, CampaignStatus>(&query)
            .bind(campaign_id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Store `checked_boxes` for a campaign/status pair.
    ///
    /// Updates the existing row if there is one, otherwise inserts it.
    /// The value must already be validated against the status's range.
    pub async fn set_checked_boxes(
        pool: &PgPool,
        campaign_id: DbId,
        status_id: DbId,
        checked_boxes: &str,
    ) -> Result<CampaignStatus, sqlx::Error> {
        match Self::find_by_pair(pool, campaign_id, status_id).await? {
            Some(existing) => Self::update(pool, existing.id, checked_boxes).await,
            None => Self::insert(pool, campaign_id, status_id, checked_boxes).await,
        }
    }

    async fn insert(
        pool: &PgPool,
        campaign_id: DbId,
        status_id: DbId,
        checked_boxes: &str,
    ) -> Result<CampaignStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_statuses (campaign_id, status_id, checked_boxes) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignStatus>(&query)
            .bind(campaign_id)
            .bind(status_id)
            .bind(checked_boxes)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        checked_boxes: &str,
    ) -> Result<CampaignStatus, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_statuses SET checked_boxes = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignStatus>(&query)
            .bind(id)
            .bind(checked_boxes)
            .fetch_one(pool)
            .await
    }
}
