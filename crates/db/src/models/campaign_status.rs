//! Campaign-local checklist progress.

use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaign_statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatus {
    pub id: DbId,
    pub campaign_id: DbId,
    pub status_id: DbId,
    pub checked_boxes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A catalog status joined with one campaign's progress.
///
/// `checked_boxes` is `""` and `campaign_status_id` is `None` until the
/// campaign first touches the status.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatusView {
    pub id: DbId,
    pub name: String,
    pub checkbox_count: i32,
    pub checked_boxes: String,
    pub campaign_status_id: Option<DbId>,
}

/// DTO for setting a campaign's checked boxes on one status.
///
/// A missing or `null` value is treated as `""`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCheckedBoxes {
    pub checked_boxes: Option<String>,
}

impl SetCheckedBoxes {
    pub fn raw(&self) -> &str {
        self.checked_boxes.as_deref().unwrap_or("")
    }
}
