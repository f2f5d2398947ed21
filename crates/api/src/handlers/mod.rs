//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers run every request through the `grail_core` rules, delegate
//! storage to the matching repository in `grail_db`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod campaign;
pub mod character;
pub mod entry;
pub mod location;
pub mod save;
pub mod status;

use grail_core::types::DbId;
use grail_db::models::campaign::Campaign;
use grail_db::repositories::CampaignRepo;

use crate::error::{AppError, AppResult};

/// Verify that a campaign exists, returning the full row.
pub(crate) async fn ensure_campaign_exists(
    pool: &sqlx::PgPool,
    campaign_id: DbId,
) -> AppResult<Campaign> {
    CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign", campaign_id))
}
